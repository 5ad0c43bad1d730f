//! # Nine Lives
//!
//! Gameplay core of a 2D physics platformer.
//!
//! The crate sits between a rigid-body simulation and the game loop. It turns
//! begin/end contact events into gameplay state (grounding, hazards, corpse
//! pinning, trigger presses) and pushes activation signals from buttons,
//! switches and timed buttons into the objects they drive.
//!
//! ## Features
//!
//! - **Activation Graph**: named activators drive any number of activatables
//!   through an XOR hysteresis rule
//! - **Contact Resolver**: tagged fixture dispatch with per-contact error isolation
//! - **Deferred Joints**: weld requests built inside contact callbacks are
//!   applied after the physics step
//! - **Mortality**: lives, corpses that burn out, respawn and level failure
//!
//! ## Frame Order
//!
//! ```text
//! pre_update ─► update ─► Simulation::step ─► post_step
//!  respawn       intent     begin/end contact   joint queue
//!  fall check    forces     (no world access)   activation graph
//!                                               corpse burn
//!                                               orphaned end-contacts
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nine_lives::prelude::*;
//!
//! let mut level = Level::build(desc, constants, GameplayConfig::default(), &mut sim)?;
//! loop {
//!     level.advance(&mut sim, 1.0 / 60.0, &intent);
//!     if level.signals().contains(LevelSignals::FAILED) {
//!         level.reset(&mut sim)?;
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod physics;
pub mod activation;
pub mod objects;
pub mod contact;
pub mod player;
pub mod mortality;
pub mod level;

/// Common imports for users of the gameplay core
pub mod prelude {
    pub use crate::{
        activation::{Activatable, Activation, ActivationGraph, Activator, ActivatorKind},
        config::{Config, ConfigError, ConstantTable, GameplayConfig},
        contact::{ContactError, ContactResolver, OpenContacts, SensorRegistry},
        foundation::math::{Isometry, Point2, Vec2},
        level::{Level, LevelDesc, LevelError, LevelSignals, ObjectView},
        mortality::{DeathOutcome, Mortality, MortalityState},
        objects::{CorpseList, DeadBody, LevelObject, SpikeOrientation},
        physics::{
            BodyHandle, Contact, ContactListener, FixtureHandle, FixtureTag, JointHandle,
            JointQueue, PendingJoint, PhysicsWorld, Simulation,
        },
        player::{Player, PlayerIntent},
    };
}
