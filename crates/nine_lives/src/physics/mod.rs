//! Physics interface for the gameplay core
//!
//! The rigid-body simulation itself lives outside this crate. This module
//! describes what the core needs from it ([`PhysicsWorld`], [`Simulation`]),
//! what the simulation reports back ([`Contact`], [`ContactListener`]), and
//! the bookkeeping the core keeps on its side of the boundary:
//!
//! - [`FixtureRegistry`]: the gameplay kind of every fixture, assigned at creation
//! - [`JointArena`]: weld joints owned by gameplay, addressed by [`JointKey`]
//! - [`JointQueue`]: joint requests deferred until the step has finished

pub mod world;
pub mod contact;
pub mod fixture;
pub mod joints;
pub mod joint_queue;

#[cfg(test)]
pub(crate) mod testing;

use slotmap::new_key_type;

new_key_type! {
    /// Handle of a rigid body owned by the simulation
    pub struct BodyHandle;
    /// Handle of a fixture (shape attached to a body) owned by the simulation
    pub struct FixtureHandle;
    /// Handle of a joint owned by the simulation
    pub struct JointHandle;
}

pub use world::{BodyDef, BodyType, FixtureDef, PhysicsWorld, Shape, Simulation, WeldJointDef};
pub use contact::{Contact, ContactEndpoint, ContactListener};
pub use fixture::{FixtureRegistry, FixtureTag, HazardKind};
pub use joints::{JointArena, JointKey, JointRecord};
pub use joint_queue::{JointQueue, PendingJoint};

/// Mutable access to the world and the core's physics bookkeeping
///
/// Handed to activatables and corpse bookkeeping between steps, never to
/// contact callbacks.
pub struct WorldContext<'a> {
    /// The simulation
    pub world: &'a mut dyn PhysicsWorld,
    /// Fixture tags
    pub fixtures: &'a mut FixtureRegistry,
    /// Gameplay-owned joints
    pub joints: &'a mut JointArena,
}

impl<'a> WorldContext<'a> {
    /// Bundle the world with the registry and arena
    pub fn new(
        world: &'a mut dyn PhysicsWorld,
        fixtures: &'a mut FixtureRegistry,
        joints: &'a mut JointArena,
    ) -> Self {
        Self {
            world,
            fixtures,
            joints,
        }
    }
}
