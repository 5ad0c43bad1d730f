//! Laser beam made of sensor planks

use log::warn;

use crate::foundation::math::{deg_to_rad, Point2, Vec2};
use crate::physics::{BodyDef, BodyHandle, FixtureDef, FixtureHandle, FixtureTag, Shape, WorldContext};

/// Longest beam a level may author, in planks
pub const MAX_PLANKS: u16 = 1024;

/// Planks needed to cover `length` with planks `plank_width` wide
///
/// `None` for a non-finite or non-positive input and for beams longer than
/// [`MAX_PLANKS`].
pub fn plank_count(length: f32, plank_width: f32) -> Option<usize> {
    let valid = length.is_finite() && plank_width.is_finite() && length > 0.0 && plank_width > 0.0;
    if !valid {
        return None;
    }
    let planks = (length / plank_width).ceil();
    if planks > f32::from(MAX_PLANKS) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let planks = planks as usize;
    Some(planks)
}

/// Static beam that kills the player on contact
#[derive(Debug)]
pub struct LaserBeam {
    body: BodyHandle,
    planks: Vec<FixtureHandle>,
    length: f32,
}

impl LaserBeam {
    /// Lay planks of `plank_size` from `origin` along `angle_degrees`
    ///
    /// The last plank is shortened so that the beam is exactly `length` long.
    /// A beam that [`plank_count`] rejects gets a body and no planks.
    pub fn build(
        ctx: &mut WorldContext<'_>,
        origin: Point2,
        angle_degrees: f32,
        length: f32,
        plank_size: Vec2,
    ) -> Self {
        let body = ctx
            .world
            .create_body(&BodyDef::fixed(origin).with_angle(deg_to_rad(angle_degrees)));

        let count = plank_count(length, plank_size.x).unwrap_or_else(|| {
            warn!("Laser of length {} with {}-wide planks left empty", length, plank_size.x);
            0
        });

        let mut planks = Vec::with_capacity(count);
        for index in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let start = index as f32 * plank_size.x;
            let width = plank_size.x.min(length - start);
            // rounding in the count can leave a sliver past the end
            if width <= plank_size.x * 1e-3 {
                break;
            }
            let shape = Shape::cuboid(
                width / 2.0,
                plank_size.y / 2.0,
                Point2::new(start + width / 2.0, 0.0),
            );
            planks.push(ctx.fixtures.create(
                ctx.world,
                body,
                &FixtureDef::sensor(shape),
                FixtureTag::LaserBeam,
            ));
        }

        Self {
            body,
            planks,
            length,
        }
    }

    /// Body carrying the planks
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Plank sensors, from the emitter outwards
    pub fn planks(&self) -> &[FixtureHandle] {
        &self.planks
    }

    /// Beam length
    pub fn length(&self) -> f32 {
        self.length
    }
}
