//! Corpses
//!
//! Every death leaves a corpse behind. Corpses are ordinary dynamic bodies
//! the player can stand on; spikes pin them, flames burn them, and a corpse
//! that has burned for long enough is removed together with every joint
//! holding it.

use log::debug;
use slotmap::{new_key_type, SlotMap};

use crate::foundation::math::{Point2, Vec2};
use crate::physics::{BodyDef, BodyHandle, FixtureDef, FixtureTag, PhysicsWorld, WorldContext};

new_key_type! {
    /// Key of a corpse in the [`CorpseList`]
    pub struct CorpseKey;
}

/// Player state captured at the moment of death
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorpseSpawn {
    /// Where the player died
    pub position: Point2,
    /// Velocity the corpse inherits
    pub velocity: Vec2,
    /// Facing at death
    pub facing_right: bool,
}

/// Fixtures and damping every corpse is built with
#[derive(Debug, Clone, PartialEq)]
pub struct CorpseTemplate {
    /// Collision shape
    pub body: FixtureDef,
    /// Optional sensor under the corpse
    pub ground_sensor: Option<FixtureDef>,
    /// Linear damping of the corpse body
    pub linear_damping: f32,
}

/// A dead player
#[derive(Debug, Clone)]
pub struct DeadBody {
    body: BodyHandle,
    position: Point2,
    velocity: Vec2,
    facing_right: bool,
    burning: bool,
    burn_ticks: u32,
}

impl DeadBody {
    /// Body of the corpse
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Position after the last step
    pub fn position(&self) -> Point2 {
        self.position
    }

    /// Velocity after the last step
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Facing inherited from the player
    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Whether a flame is touching the corpse
    pub fn is_burning(&self) -> bool {
        self.burning
    }

    /// Set by flame contacts
    pub fn set_burning(&mut self, burning: bool) {
        self.burning = burning;
    }

    /// Frames spent burning
    pub fn burn_ticks(&self) -> u32 {
        self.burn_ticks
    }

    fn sync(&mut self, world: &dyn PhysicsWorld) {
        if let Some(position) = world.position(self.body) {
            self.position = position;
        }
        if let Some(velocity) = world.linear_velocity(self.body) {
            self.velocity = velocity;
        }
    }
}

/// Corpses of the current level
#[derive(Debug, Default)]
pub struct CorpseList {
    corpses: SlotMap<CorpseKey, DeadBody>,
}

impl CorpseList {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a corpse body in the world and admit it to the list
    pub fn spawn(
        &mut self,
        ctx: &mut WorldContext<'_>,
        spawn: &CorpseSpawn,
        template: &CorpseTemplate,
    ) -> CorpseKey {
        let body = ctx.world.create_body(
            &BodyDef::dynamic(spawn.position)
                .with_velocity(spawn.velocity)
                .with_damping(template.linear_damping),
        );

        let key = self.corpses.insert(DeadBody {
            body,
            position: spawn.position,
            velocity: spawn.velocity,
            facing_right: spawn.facing_right,
            burning: false,
            burn_ticks: 0,
        });

        ctx.fixtures
            .create(ctx.world, body, &template.body, FixtureTag::Corpse(key));
        if let Some(sensor) = &template.ground_sensor {
            ctx.fixtures
                .create(ctx.world, body, sensor, FixtureTag::Corpse(key));
        }

        debug!(
            "Corpse {} admitted at ({:.2}, {:.2})",
            self.len(),
            spawn.position.x,
            spawn.position.y
        );
        key
    }

    /// Corpse by key
    pub fn get(&self, key: CorpseKey) -> Option<&DeadBody> {
        self.corpses.get(key)
    }

    /// Mutable corpse by key
    pub fn get_mut(&mut self, key: CorpseKey) -> Option<&mut DeadBody> {
        self.corpses.get_mut(key)
    }

    /// Whether `key` names a corpse still in the level
    pub fn contains(&self, key: CorpseKey) -> bool {
        self.corpses.contains_key(key)
    }

    /// Number of corpses
    pub fn len(&self) -> usize {
        self.corpses.len()
    }

    /// Whether there are no corpses
    pub fn is_empty(&self) -> bool {
        self.corpses.is_empty()
    }

    /// All corpses
    pub fn iter(&self) -> impl Iterator<Item = (CorpseKey, &DeadBody)> {
        self.corpses.iter()
    }

    /// Advance burn timers and remove corpses that burned out
    ///
    /// Joints attached to a removed corpse leave the arena before its body is
    /// destroyed. Returns how many corpses were removed.
    pub fn update(&mut self, ctx: &mut WorldContext<'_>, burn_limit: u32) -> usize {
        let mut burned_out = Vec::new();
        for (key, corpse) in &mut self.corpses {
            corpse.sync(&*ctx.world);
            if corpse.burning {
                corpse.burn_ticks += 1;
                if corpse.burn_ticks >= burn_limit {
                    burned_out.push(key);
                }
            }
        }

        for key in &burned_out {
            if let Some(corpse) = self.corpses.remove(*key) {
                let joints = ctx.joints.release_attached(ctx.world, corpse.body);
                ctx.fixtures.destroy_body(ctx.world, corpse.body);
                debug!("Corpse burned out, released {} joint(s)", joints);
            }
        }
        burned_out.len()
    }

    /// Destroy every corpse body and empty the list
    pub fn clear(&mut self, ctx: &mut WorldContext<'_>) {
        for (_, corpse) in self.corpses.drain() {
            ctx.joints.release_attached(ctx.world, corpse.body);
            ctx.fixtures.destroy_body(ctx.world, corpse.body);
        }
    }
}
