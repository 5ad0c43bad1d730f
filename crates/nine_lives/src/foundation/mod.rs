//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types shared with the physics interface
//! - Logging utilities

pub mod math;
pub mod logging;
