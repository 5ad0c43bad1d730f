//! Contact events reported by the simulation

use super::{BodyHandle, FixtureHandle};
use crate::foundation::math::{Isometry, Point2, Vec2};

/// One side of a contact
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEndpoint {
    /// Fixture that is touching
    pub fixture: FixtureHandle,
    /// Body owning the fixture
    pub body: BodyHandle,
    /// Body transform at the time of the event
    pub transform: Isometry,
    /// Body linear velocity at the time of the event
    pub linear_velocity: Vec2,
}

impl ContactEndpoint {
    /// Express a world point in this body's local frame
    pub fn local_point(&self, world_point: &Point2) -> Point2 {
        self.transform.inverse_transform_point(world_point)
    }
}

/// A pair of fixtures that started or stopped touching
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    /// First endpoint
    pub a: ContactEndpoint,
    /// Second endpoint
    pub b: ContactEndpoint,
    /// World-space manifold points (empty for sensor contacts and end events)
    pub points: Vec<Point2>,
}

/// Receiver of contact callbacks during [`Simulation::step`](super::Simulation::step)
pub trait ContactListener {
    /// Two fixtures started touching
    fn begin_contact(&mut self, contact: &Contact);

    /// Two fixtures stopped touching
    fn end_contact(&mut self, contact: &Contact);
}
