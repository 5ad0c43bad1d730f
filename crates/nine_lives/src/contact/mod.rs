//! Contact resolution
//!
//! Turns the simulation's begin/end-contact events into gameplay state:
//! grounding and wall contact for the player, goals, hazard deaths, corpse
//! pinning and burning, and activator presses. [`OpenContacts`] closes the
//! pairs left open when gameplay destroys a fixture between steps.

pub mod error;
pub mod ledger;
pub mod resolver;
pub mod sensor;

pub use error::ContactError;
pub use ledger::OpenContacts;
pub use resolver::{ContactResolver, ContactTargets};
pub use sensor::SensorRegistry;
