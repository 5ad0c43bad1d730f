//! Math utilities and types
//!
//! Provides the 2D math types exchanged with the physics simulation.

pub use nalgebra::{Isometry2, Point2 as NaPoint2, Vector2};

/// 2D vector type (velocities, forces, offsets)
pub type Vec2 = Vector2<f32>;

/// 2D point type (world or body-local positions)
pub type Point2 = NaPoint2<f32>;

/// Rigid transform of a body (translation + rotation)
pub type Isometry = Isometry2<f32>;

/// Convert degrees to radians
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees.to_radians()
}

/// Sign of a value, with zero mapped to zero
pub fn signum_or_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value.signum()
    }
}
