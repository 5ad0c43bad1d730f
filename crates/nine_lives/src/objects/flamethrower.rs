//! Flamethrower
//!
//! A static base with a flame sensor on top. The flame exists only while the
//! flamethrower is active; it kills the player and sets corpses on fire.

use log::debug;

use crate::activation::{Activatable, Activation};
use crate::foundation::math::Point2;
use crate::physics::{BodyDef, BodyHandle, FixtureDef, FixtureHandle, FixtureTag, WorldContext};

use super::ObjectKey;

/// Activatable flamethrower
#[derive(Debug)]
pub struct Flamethrower {
    key: ObjectKey,
    body: BodyHandle,
    activation: Activation,
    flame_def: FixtureDef,
    flame: Option<FixtureHandle>,
}

impl Flamethrower {
    /// Create the base, and the flame when initially active
    pub fn build(
        ctx: &mut WorldContext<'_>,
        key: ObjectKey,
        position: Point2,
        base: &FixtureDef,
        flame: FixtureDef,
        initially_active: bool,
    ) -> Self {
        let body = ctx.world.create_body(&BodyDef::fixed(position));
        ctx.fixtures.create(ctx.world, body, base, FixtureTag::Terrain);

        let mut flamethrower = Self {
            key,
            body,
            activation: Activation::new(initially_active),
            flame_def: flame,
            flame: None,
        };
        if initially_active {
            flamethrower.ignite(ctx);
        }
        flamethrower
    }

    /// Body of the base
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Flame sensor, while burning
    pub fn flame(&self) -> Option<FixtureHandle> {
        self.flame
    }

    fn ignite(&mut self, ctx: &mut WorldContext<'_>) {
        if self.flame.is_none() {
            self.flame = Some(ctx.fixtures.create(
                ctx.world,
                self.body,
                &self.flame_def,
                FixtureTag::Flame(self.key),
            ));
        }
    }
}

impl Activatable for Flamethrower {
    fn activation(&self) -> &Activation {
        &self.activation
    }

    fn activation_mut(&mut self) -> &mut Activation {
        &mut self.activation
    }

    fn on_activated(&mut self, ctx: &mut WorldContext<'_>) {
        self.ignite(ctx);
        debug!("Flamethrower {:?} lit", self.key);
    }

    fn on_deactivated(&mut self, ctx: &mut WorldContext<'_>) {
        if let Some(flame) = self.flame.take() {
            ctx.fixtures.destroy(ctx.world, flame);
        }
        debug!("Flamethrower {:?} out", self.key);
    }
}
