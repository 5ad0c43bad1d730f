//! Activation system
//!
//! Activators (buttons, switches, timed buttons) are sampled once per frame
//! and their boolean output is pushed into every activatable registered under
//! the activator's id. Activatables react only to changes of their effective
//! state, so re-sending the same signal is free.

pub mod activatable;
pub mod activator;
pub mod graph;

pub use activatable::{Activatable, Activation, Transition};
pub use activator::{Activator, ActivatorKey, ActivatorKind};
pub use graph::{ActivationError, ActivationGraph};
