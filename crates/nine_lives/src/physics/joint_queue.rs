//! Deferred joint creation
//!
//! The simulation forbids creating joints while it is stepping, which is
//! exactly when contact callbacks decide that a corpse must be welded to a
//! surface. Those requests are queued here and applied once the step is over.

use std::collections::VecDeque;

use log::{debug, warn};

use super::{JointArena, JointKey, JointRecord, PhysicsWorld, WeldJointDef};
use crate::objects::ObjectKey;

/// A joint request that owns no simulation resources yet
#[derive(Debug, Clone, PartialEq)]
pub struct PendingJoint {
    /// Fully specified weld
    pub def: WeldJointDef,
    /// Hazard that must track the joint once it exists
    pub owner: Option<ObjectKey>,
}

/// FIFO of pending joints
#[derive(Debug, Default)]
pub struct JointQueue {
    pending: VecDeque<PendingJoint>,
}

impl JointQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request
    pub fn push(&mut self, request: PendingJoint) {
        self.pending.push_back(request);
    }

    /// Requests waiting to be applied, oldest first
    pub fn pending(&self) -> impl Iterator<Item = &PendingJoint> {
        self.pending.iter()
    }

    /// Number of queued requests
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is queued
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Discard all requests
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Apply every queued request, in order
    ///
    /// Must only run between simulation steps. Each created joint is
    /// recorded in `arena`; `on_applied` is then told about requests that
    /// name an owner, because the arena key does not exist before this point.
    /// Requests whose bodies have disappeared are dropped.
    pub fn drain_into(
        &mut self,
        world: &mut dyn PhysicsWorld,
        arena: &mut JointArena,
        mut on_applied: impl FnMut(ObjectKey, JointKey),
    ) -> usize {
        let mut applied = 0;

        while let Some(request) = self.pending.pop_front() {
            let def = &request.def;
            if !world.contains_body(def.body_a) || !world.contains_body(def.body_b) {
                warn!("Dropping joint request for a body that no longer exists");
                continue;
            }

            let joint = world.create_weld_joint(def);
            let key = arena.insert(JointRecord {
                joint,
                body_a: def.body_a,
                body_b: def.body_b,
            });

            if let Some(owner) = request.owner {
                on_applied(owner, key);
            }
            applied += 1;
        }

        if applied > 0 {
            debug!("Applied {} deferred joint(s)", applied);
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point2;
    use crate::physics::testing::TestWorld;
    use crate::physics::{BodyDef, BodyHandle};
    use slotmap::SlotMap;

    fn request(a: BodyHandle, b: BodyHandle, owner: Option<ObjectKey>) -> PendingJoint {
        PendingJoint {
            def: WeldJointDef {
                body_a: a,
                body_b: b,
                local_anchor_a: Point2::new(0.1, 0.0),
                local_anchor_b: Point2::new(-0.1, 0.0),
                collide_connected: false,
            },
            owner,
        }
    }

    #[test]
    fn test_nothing_applied_until_drained() {
        let mut world = TestWorld::new();
        let a = world.create_body(&BodyDef::dynamic(Point2::origin()));
        let b = world.create_body(&BodyDef::fixed(Point2::origin()));
        let mut queue = JointQueue::new();

        queue.push(request(a, b, None));
        queue.push(request(a, b, None));

        assert_eq!(queue.len(), 2);
        assert!(world.joints.is_empty());
    }

    #[test]
    fn test_drain_applies_in_order_and_notifies_owner() {
        let mut world = TestWorld::new();
        let mut arena = JointArena::new();
        let mut owners: SlotMap<ObjectKey, ()> = SlotMap::with_key();
        let spikes = owners.insert(());
        let a = world.create_body(&BodyDef::dynamic(Point2::origin()));
        let b = world.create_body(&BodyDef::fixed(Point2::origin()));
        let mut queue = JointQueue::new();
        queue.push(request(a, b, Some(spikes)));
        queue.push(request(a, b, None));

        let mut notified = Vec::new();
        let applied = queue.drain_into(&mut world, &mut arena, |owner, key| {
            notified.push((owner, key));
        });

        assert_eq!(applied, 2);
        assert!(queue.is_empty());
        assert_eq!(arena.len(), 2);
        assert_eq!(notified.len(), 1);
        assert_eq!(notified[0].0, spikes);
        assert!(arena.get(notified[0].1).is_some());
    }

    #[test]
    fn test_drain_drops_requests_for_missing_bodies() {
        let mut world = TestWorld::new();
        let mut arena = JointArena::new();
        let a = world.create_body(&BodyDef::dynamic(Point2::origin()));
        let b = world.create_body(&BodyDef::fixed(Point2::origin()));
        let mut queue = JointQueue::new();
        queue.push(request(a, b, None));
        world.destroy_body(a);

        assert_eq!(queue.drain_into(&mut world, &mut arena, |_, _| {}), 0);
        assert!(queue.is_empty());
        assert!(arena.is_empty());
    }
}
