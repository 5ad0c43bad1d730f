//! Spikes
//!
//! A static body with a solid base and a hazard sensor. Both fixtures exist
//! only while the spikes are active. Corpses that land on active spikes are
//! welded to them; the spikes keep the [`JointKey`]s so that deactivating
//! them lets every pinned corpse fall.

use log::debug;

use crate::activation::{Activatable, Activation};
use crate::foundation::math::{deg_to_rad, Point2};
use crate::physics::{
    BodyDef, BodyHandle, FixtureDef, FixtureHandle, FixtureTag, JointKey, WorldContext,
};

use super::ObjectKey;

/// Tolerance when snapping an authored angle to a right angle
const ANGLE_EPSILON: f32 = 1e-3;

/// Right-angle orientation of a spikes object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpikeOrientation {
    /// 0°, points up
    Up,
    /// 90°, points left
    Left,
    /// 180°, points down
    Down,
    /// 270°, points right
    Right,
}

impl SpikeOrientation {
    /// Snap an authored angle in degrees
    ///
    /// Returns `None` unless the angle is a multiple of 90°.
    pub fn from_degrees(degrees: f32) -> Option<Self> {
        let whole = degrees.round();
        if !whole.is_finite() || (degrees - whole).abs() > ANGLE_EPSILON {
            return None;
        }

        #[allow(clippy::cast_possible_truncation)]
        let degrees = (whole as i64).rem_euclid(360);
        match degrees {
            0 => Some(Self::Up),
            90 => Some(Self::Left),
            180 => Some(Self::Down),
            270 => Some(Self::Right),
            _ => None,
        }
    }

    /// Angle in degrees
    pub fn degrees(self) -> f32 {
        match self {
            Self::Up => 0.0,
            Self::Left => 90.0,
            Self::Down => 180.0,
            Self::Right => 270.0,
        }
    }

    /// Angle in radians
    pub fn radians(self) -> f32 {
        deg_to_rad(self.degrees())
    }

    /// Whether corpses touching the sensor get welded
    ///
    /// Downward spikes hang from a ceiling and never pin anything.
    pub fn welds_corpses(self) -> bool {
        match self {
            Self::Up | Self::Left | Self::Right => true,
            Self::Down => false,
        }
    }
}

/// Fixture definitions of a spikes object, in body-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SpikesFixtures {
    /// Solid base
    pub solid: FixtureDef,
    /// Hazard sensor
    pub sensor: FixtureDef,
}

/// Activatable spikes
#[derive(Debug)]
pub struct Spikes {
    key: ObjectKey,
    body: BodyHandle,
    orientation: SpikeOrientation,
    activation: Activation,
    defs: SpikesFixtures,
    solid: Option<FixtureHandle>,
    sensor: Option<FixtureHandle>,
    joints: Vec<JointKey>,
}

impl Spikes {
    /// Create the body, and the fixtures when initially active
    pub fn build(
        ctx: &mut WorldContext<'_>,
        key: ObjectKey,
        position: Point2,
        orientation: SpikeOrientation,
        defs: SpikesFixtures,
        initially_active: bool,
    ) -> Self {
        let body = ctx
            .world
            .create_body(&BodyDef::fixed(position).with_angle(orientation.radians()));

        let mut spikes = Self {
            key,
            body,
            orientation,
            activation: Activation::new(initially_active),
            defs,
            solid: None,
            sensor: None,
            joints: Vec::new(),
        };
        if initially_active {
            spikes.create_fixtures(ctx);
        }
        spikes
    }

    /// Body of the spikes
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Snapped orientation
    pub fn orientation(&self) -> SpikeOrientation {
        self.orientation
    }

    /// Hazard sensor, while active
    pub fn sensor(&self) -> Option<FixtureHandle> {
        self.sensor
    }

    /// Solid base, while active
    pub fn solid(&self) -> Option<FixtureHandle> {
        self.solid
    }

    /// Joints welded to these spikes; some may already be gone
    pub fn joints(&self) -> &[JointKey] {
        &self.joints
    }

    /// Remember a weld created for these spikes
    pub fn track_joint(&mut self, joint: JointKey) {
        self.joints.push(joint);
    }

    /// Destroy every tracked joint still alive, returning how many were
    pub fn release_joints(&mut self, ctx: &mut WorldContext<'_>) -> usize {
        self.joints
            .drain(..)
            .filter(|key| ctx.joints.release(ctx.world, *key))
            .count()
    }

    fn create_fixtures(&mut self, ctx: &mut WorldContext<'_>) {
        if self.solid.is_none() {
            self.solid = Some(ctx.fixtures.create(
                ctx.world,
                self.body,
                &self.defs.solid,
                FixtureTag::Terrain,
            ));
        }
        if self.sensor.is_none() {
            self.sensor = Some(ctx.fixtures.create(
                ctx.world,
                self.body,
                &self.defs.sensor,
                FixtureTag::Spikes(self.key),
            ));
        }
    }

    fn release_fixtures(&mut self, ctx: &mut WorldContext<'_>) {
        for fixture in [self.solid.take(), self.sensor.take()].into_iter().flatten() {
            ctx.fixtures.destroy(ctx.world, fixture);
        }
    }
}

impl Activatable for Spikes {
    fn activation(&self) -> &Activation {
        &self.activation
    }

    fn activation_mut(&mut self) -> &mut Activation {
        &mut self.activation
    }

    fn on_activated(&mut self, ctx: &mut WorldContext<'_>) {
        self.create_fixtures(ctx);
        debug!("Spikes {:?} raised", self.key);
    }

    fn on_deactivated(&mut self, ctx: &mut WorldContext<'_>) {
        self.release_fixtures(ctx);
        let released = self.release_joints(ctx);
        debug!("Spikes {:?} lowered, released {} corpse joint(s)", self.key, released);
    }
}
