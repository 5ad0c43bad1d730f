//! Arena of weld joints created by gameplay
//!
//! Hazards remember the joints welded to them so that deactivating the
//! hazard releases its corpses. They hold [`JointKey`]s into this arena, not
//! simulation handles: when a corpse burns out first, its joints leave the
//! arena and the hazard's stale keys simply resolve to nothing.

use slotmap::{new_key_type, SlotMap};

use super::{BodyHandle, JointHandle, PhysicsWorld};

new_key_type! {
    /// Key of a joint in the [`JointArena`]
    pub struct JointKey;
}

/// A live joint and the bodies it connects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JointRecord {
    /// Simulation handle
    pub joint: JointHandle,
    /// First body
    pub body_a: BodyHandle,
    /// Second body
    pub body_b: BodyHandle,
}

impl JointRecord {
    /// Whether the joint is attached to `body`
    pub fn involves(&self, body: BodyHandle) -> bool {
        self.body_a == body || self.body_b == body
    }
}

/// Joints owned by gameplay
#[derive(Debug, Default)]
pub struct JointArena {
    joints: SlotMap<JointKey, JointRecord>,
}

impl JointArena {
    /// Create an empty arena
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a joint that was just created in the world
    pub fn insert(&mut self, record: JointRecord) -> JointKey {
        self.joints.insert(record)
    }

    /// Look up a joint
    pub fn get(&self, key: JointKey) -> Option<&JointRecord> {
        self.joints.get(key)
    }

    /// Destroy a joint in the world if it is still tracked
    ///
    /// Returns `false` for keys whose joint is already gone.
    pub fn release(&mut self, world: &mut dyn PhysicsWorld, key: JointKey) -> bool {
        match self.joints.remove(key) {
            Some(record) => {
                world.destroy_joint(record.joint);
                true
            }
            None => false,
        }
    }

    /// Destroy every joint attached to `body`, returning how many were released
    pub fn release_attached(&mut self, world: &mut dyn PhysicsWorld, body: BodyHandle) -> usize {
        let attached: Vec<JointKey> = self
            .joints
            .iter()
            .filter(|(_, record)| record.involves(body))
            .map(|(key, _)| key)
            .collect();

        for key in &attached {
            self.release(world, *key);
        }
        attached.len()
    }

    /// Number of live joints
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Whether the arena is empty
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// Forget every joint (the world is being torn down separately)
    pub fn clear(&mut self) {
        self.joints.clear();
    }
}
