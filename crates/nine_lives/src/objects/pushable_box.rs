//! Pushable box
//!
//! Dynamic while inactive so the player can shove it around; kinematic (and
//! at rest) while active, which turns it into a platform that stays put.

use log::debug;

use crate::activation::{Activatable, Activation};
use crate::foundation::math::{Point2, Vec2};
use crate::physics::{BodyDef, BodyHandle, BodyType, FixtureDef, FixtureTag, WorldContext};

/// Activatable crate
#[derive(Debug)]
pub struct PushableBox {
    body: BodyHandle,
    activation: Activation,
}

impl PushableBox {
    /// Create the body and its solid fixture
    pub fn build(
        ctx: &mut WorldContext<'_>,
        position: Point2,
        fixture: &FixtureDef,
        initially_active: bool,
    ) -> Self {
        let def = if initially_active {
            BodyDef {
                body_type: BodyType::Kinematic,
                ..BodyDef::dynamic(position)
            }
        } else {
            BodyDef::dynamic(position)
        };
        let body = ctx.world.create_body(&def);
        ctx.fixtures
            .create(ctx.world, body, fixture, FixtureTag::Terrain);

        Self {
            body,
            activation: Activation::new(initially_active),
        }
    }

    /// Body of the box
    pub fn body(&self) -> BodyHandle {
        self.body
    }
}

impl Activatable for PushableBox {
    fn activation(&self) -> &Activation {
        &self.activation
    }

    fn activation_mut(&mut self) -> &mut Activation {
        &mut self.activation
    }

    fn on_activated(&mut self, ctx: &mut WorldContext<'_>) {
        ctx.world.set_body_type(self.body, BodyType::Kinematic);
        ctx.world.set_linear_velocity(self.body, Vec2::zeros());
        debug!("Box frozen");
    }

    fn on_deactivated(&mut self, ctx: &mut WorldContext<'_>) {
        ctx.world.set_body_type(self.body, BodyType::Dynamic);
        debug!("Box released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::testing::TestWorld;
    use crate::physics::{FixtureRegistry, JointArena, Shape};

    fn fixture() -> FixtureDef {
        FixtureDef::solid(Shape::cuboid(0.5, 0.5, Point2::origin())).with_density(1.0)
    }

    #[test]
    fn test_body_type_follows_activation() {
        let mut world = TestWorld::new();
        let mut fixtures = FixtureRegistry::new();
        let mut joints = JointArena::new();
        let mut ctx = WorldContext::new(&mut world, &mut fixtures, &mut joints);

        let mut crate_box = PushableBox::build(&mut ctx, Point2::new(2.0, 1.0), &fixture(), false);
        assert_eq!(ctx.world.body_type(crate_box.body()), Some(BodyType::Dynamic));

        ctx.world.set_linear_velocity(crate_box.body(), Vec2::new(3.0, 0.0));
        crate_box.set_signal(true, &mut ctx);
        assert_eq!(ctx.world.body_type(crate_box.body()), Some(BodyType::Kinematic));
        assert_eq!(ctx.world.linear_velocity(crate_box.body()), Some(Vec2::zeros()));

        crate_box.set_signal(false, &mut ctx);
        assert_eq!(ctx.world.body_type(crate_box.body()), Some(BodyType::Dynamic));
    }

    #[test]
    fn test_initially_active_box_starts_kinematic() {
        let mut world = TestWorld::new();
        let mut fixtures = FixtureRegistry::new();
        let mut joints = JointArena::new();
        let mut ctx = WorldContext::new(&mut world, &mut fixtures, &mut joints);

        let crate_box = PushableBox::build(&mut ctx, Point2::origin(), &fixture(), true);

        assert!(crate_box.is_activated());
        assert_eq!(world.body(crate_box.body()).body_type, BodyType::Kinematic);
    }
}
