//! Requests the gameplay core issues to the simulation

use serde::{Deserialize, Serialize};

use super::{BodyHandle, ContactListener, FixtureHandle, JointHandle};
use crate::foundation::math::{Isometry, Point2, Vec2};

/// How the simulation moves a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyType {
    /// Never moves
    Static,
    /// Moved by velocity only, ignores forces
    Kinematic,
    /// Fully simulated
    Dynamic,
}

/// Description of a body to create
#[derive(Debug, Clone, PartialEq)]
pub struct BodyDef {
    /// Body type
    pub body_type: BodyType,
    /// World position of the body origin
    pub position: Point2,
    /// Rotation in radians
    pub angle: f32,
    /// Initial linear velocity
    pub linear_velocity: Vec2,
    /// Linear damping
    pub linear_damping: f32,
    /// Prevent rotation
    pub fixed_rotation: bool,
}

impl BodyDef {
    /// Static body at `position`
    pub fn fixed(position: Point2) -> Self {
        Self {
            body_type: BodyType::Static,
            position,
            angle: 0.0,
            linear_velocity: Vec2::zeros(),
            linear_damping: 0.0,
            fixed_rotation: true,
        }
    }

    /// Dynamic body at `position`
    pub fn dynamic(position: Point2) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            ..Self::fixed(position)
        }
    }

    /// Set rotation in radians
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = angle;
        self
    }

    /// Set initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Set linear damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }
}

/// Collision shape in body-local coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Convex polygon
    Polygon(Vec<Point2>),
    /// Oriented box
    Cuboid {
        /// Half width and half height
        half_extents: Vec2,
        /// Box centre relative to the body origin
        center: Point2,
    },
    /// Vertical capsule centred on the body origin
    Capsule {
        /// Half height of the straight segment
        half_height: f32,
        /// Cap radius
        radius: f32,
    },
}

impl Shape {
    /// Axis-aligned box helper
    pub fn cuboid(half_width: f32, half_height: f32, center: Point2) -> Self {
        Self::Cuboid {
            half_extents: Vec2::new(half_width, half_height),
            center,
        }
    }

    /// Polygon from a flat `[x0, y0, x1, y1, ...]` list
    pub fn polygon_from_flat(coords: &[f32]) -> Self {
        Self::Polygon(
            coords
                .chunks_exact(2)
                .map(|pair| Point2::new(pair[0], pair[1]))
                .collect(),
        )
    }
}

/// Description of a fixture to create
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureDef {
    /// Shape
    pub shape: Shape,
    /// Density
    pub density: f32,
    /// Friction
    pub friction: f32,
    /// Restitution
    pub restitution: f32,
    /// Sensors report contacts without a collision response
    pub is_sensor: bool,
}

impl FixtureDef {
    /// Solid fixture with zero density and friction
    pub fn solid(shape: Shape) -> Self {
        Self {
            shape,
            density: 0.0,
            friction: 0.0,
            restitution: 0.0,
            is_sensor: false,
        }
    }

    /// Sensor fixture
    pub fn sensor(shape: Shape) -> Self {
        Self {
            is_sensor: true,
            ..Self::solid(shape)
        }
    }

    /// Set density
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    /// Set friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }
}

/// Weld joint request, anchors in each body's local frame
#[derive(Debug, Clone, PartialEq)]
pub struct WeldJointDef {
    /// First body
    pub body_a: BodyHandle,
    /// Second body
    pub body_b: BodyHandle,
    /// Anchor on `body_a`
    pub local_anchor_a: Point2,
    /// Anchor on `body_b`
    pub local_anchor_b: Point2,
    /// Whether the welded bodies still collide with each other
    pub collide_connected: bool,
}

/// Mutations and queries the core performs on the simulation
///
/// None of these may be called from inside a [`ContactListener`] callback.
/// [`Simulation::step`] only hands the listener to the callbacks, never the
/// world, so the rule holds by construction.
pub trait PhysicsWorld {
    /// Create a body
    fn create_body(&mut self, def: &BodyDef) -> BodyHandle;

    /// Destroy a body together with its fixtures and joints
    fn destroy_body(&mut self, body: BodyHandle);

    /// Whether `body` is still alive
    fn contains_body(&self, body: BodyHandle) -> bool;

    /// Attach a fixture to a body
    fn create_fixture(&mut self, body: BodyHandle, def: &FixtureDef) -> FixtureHandle;

    /// Remove a fixture
    fn destroy_fixture(&mut self, fixture: FixtureHandle);

    /// Create a weld joint
    fn create_weld_joint(&mut self, def: &WeldJointDef) -> JointHandle;

    /// Destroy a joint
    fn destroy_joint(&mut self, joint: JointHandle);

    /// Current body type
    fn body_type(&self, body: BodyHandle) -> Option<BodyType>;

    /// Change a body's type
    fn set_body_type(&mut self, body: BodyHandle, body_type: BodyType);

    /// Body transform
    fn transform(&self, body: BodyHandle) -> Option<Isometry>;

    /// Teleport a body
    fn set_position(&mut self, body: BodyHandle, position: Point2);

    /// Linear velocity
    fn linear_velocity(&self, body: BodyHandle) -> Option<Vec2>;

    /// Overwrite linear velocity
    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec2);

    /// Apply a force at the centre of mass
    fn apply_force(&mut self, body: BodyHandle, force: Vec2);

    /// Apply an impulse at the centre of mass
    fn apply_linear_impulse(&mut self, body: BodyHandle, impulse: Vec2);

    /// Body position (translation part of [`PhysicsWorld::transform`])
    fn position(&self, body: BodyHandle) -> Option<Point2> {
        self.transform(body)
            .map(|iso| Point2::from(iso.translation.vector))
    }
}

/// A world that can be stepped
pub trait Simulation: PhysicsWorld {
    /// Advance the simulation by `dt` seconds
    ///
    /// Every contact that starts or stops touching during the step is
    /// reported synchronously to `listener`. Fixtures destroyed between steps
    /// need no end-contact; the level closes those pairs itself and ignores a
    /// late one.
    fn step(&mut self, dt: f32, listener: &mut dyn ContactListener);
}
