//! Level runtime
//!
//! [`Level`] owns every piece of gameplay state for one level and drives the
//! frame:
//!
//! 1. [`Level::pre_update`]: fall check, respawn and corpse admission
//! 2. [`Level::update`]: player intent
//! 3. [`Simulation::step`] with the level as [`ContactListener`]
//! 4. [`Level::post_step`]: deferred joints, activation graph, corpse burn,
//!    then end-contacts for fixtures destroyed along the way
//!
//! [`Level::advance`] runs all four.

mod builder;
mod desc;
mod error;

#[cfg(test)]
mod tests;

pub use desc::{
    ActivatorDesc, ActivatorType, BoxDesc, DoorDesc, FlamethrowerDesc, LaserDesc, LevelDesc,
    PlayerDesc, SpikesDesc,
};
pub use error::LevelError;

use bitflags::bitflags;
use log::{debug, info, warn};

use crate::activation::{Activatable, ActivationGraph};
use crate::config::{ConstantTable, GameplayConfig};
use crate::contact::{ContactResolver, ContactTargets, OpenContacts};
use crate::foundation::math::Point2;
use crate::mortality::Mortality;
use crate::objects::{CorpseList, CorpseTemplate, LaserBeam, LevelObject, LevelObjects, ObjectKey};
use crate::physics::{
    BodyHandle, Contact, ContactListener, FixtureRegistry, JointArena, JointQueue, PhysicsWorld,
    Simulation, WorldContext,
};
use crate::player::{Player, PlayerIntent};

bitflags! {
    /// Outcome flags polled by the game loop
    ///
    /// Flags stay raised until [`Level::reset`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct LevelSignals: u8 {
        /// The player reached the goal
        const COMPLETE = 1;
        /// The player reached the return goal
        const RETURN_REACHED = 1 << 1;
        /// Lives exhausted or fell out of the world
        const FAILED = 1 << 2;
    }
}

/// What a renderer needs to draw one activatable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectView {
    /// Object key
    pub key: ObjectKey,
    /// `"spikes"`, `"box"` or `"flamethrower"`
    pub kind: &'static str,
    /// Effective activation state
    pub activated: bool,
    /// Body position, if the body still exists
    pub position: Option<Point2>,
}

/// One running level
#[derive(Debug)]
pub struct Level {
    desc: LevelDesc,
    constants: ConstantTable,
    config: GameplayConfig,

    fixtures: FixtureRegistry,
    joints: JointArena,
    joint_queue: JointQueue,

    activation: ActivationGraph,
    objects: LevelObjects,
    lasers: Vec<LaserBeam>,
    corpses: CorpseList,
    corpse_template: CorpseTemplate,

    player: Player,
    respawn_point: Point2,
    mortality: Mortality,
    resolver: ContactResolver,
    contacts: OpenContacts,
    signals: LevelSignals,

    bodies: Vec<BodyHandle>,
    frame: u64,
}

impl Level {
    /// Validate `desc` and create its bodies in `world`
    ///
    /// Nothing is created when validation fails.
    pub fn build(
        desc: LevelDesc,
        constants: ConstantTable,
        config: GameplayConfig,
        world: &mut dyn PhysicsWorld,
    ) -> Result<Self, LevelError> {
        let mut fixtures = FixtureRegistry::new();
        let mut joints = JointArena::new();
        let populated = {
            let mut ctx = WorldContext::new(world, &mut fixtures, &mut joints);
            builder::populate(&desc, &constants, &config, &mut ctx, false)?
        };

        info!(
            "Level built: {} bodies, {} lives",
            populated.bodies.len(),
            config.max_lives
        );

        Ok(Self {
            resolver: ContactResolver::new(populated.player.body()),
            contacts: OpenContacts::new(),
            mortality: Mortality::new(config.max_lives),
            desc,
            constants,
            config,
            fixtures,
            joints,
            joint_queue: JointQueue::new(),
            activation: populated.activation,
            objects: populated.objects,
            lasers: populated.lasers,
            corpses: CorpseList::new(),
            corpse_template: populated.corpse_template,
            player: populated.player,
            respawn_point: populated.respawn_point,
            signals: LevelSignals::empty(),
            bodies: populated.bodies,
            frame: 0,
        })
    }

    /// Fall check and pending respawn
    ///
    /// Returns `false` once the level has failed; the rest of the frame should
    /// then be skipped until [`Level::reset`].
    pub fn pre_update(&mut self, world: &mut dyn PhysicsWorld) -> bool {
        if self.mortality.is_failed() {
            return false;
        }

        if let Some(position) = world.position(self.player.body()) {
            if position.y < self.config.fall_threshold_y && self.mortality.fall_out() {
                self.signals.insert(LevelSignals::FAILED);
                info!("Level failed at frame {}", self.frame);
                return false;
            }
        }

        if let Some(corpse) = self.mortality.take_respawn() {
            self.player.teleport(world, self.respawn_point);
            let mut ctx = WorldContext::new(world, &mut self.fixtures, &mut self.joints);
            self.corpses.spawn(&mut ctx, &corpse, &self.corpse_template);
        }
        true
    }

    /// Apply player intent
    pub fn update(&mut self, world: &mut dyn PhysicsWorld, intent: &PlayerIntent) {
        if !self.mortality.is_alive() {
            return;
        }
        self.player.apply_intent(intent);
        self.player.apply_forces(world);
    }

    /// Work that must wait until the simulation step has finished
    pub fn post_step(&mut self, world: &mut dyn PhysicsWorld) {
        let Self {
            joint_queue,
            joints,
            fixtures,
            objects,
            activation,
            corpses,
            config,
            ..
        } = self;

        joint_queue.drain_into(world, joints, |owner, key| {
            match objects.get_mut(owner).and_then(LevelObject::as_spikes_mut) {
                Some(spikes) => spikes.track_joint(key),
                None => warn!("Weld owner {:?} is not a set of spikes", owner),
            }
        });

        let mut ctx = WorldContext::new(world, fixtures, joints);
        activation.evaluate(objects, &mut ctx);
        corpses.update(&mut ctx, config.corpse_burn_ticks);

        self.close_retired_contacts();
        self.frame += 1;
    }

    /// End every open contact whose fixture was destroyed by gameplay
    fn close_retired_contacts(&mut self) {
        let retired = self.contacts.retire(&self.fixtures);
        if retired.is_empty() {
            return;
        }
        debug!("Closing {} contact(s) on destroyed fixtures", retired.len());
        let (resolver, mut targets) = self.contact_parts();
        for contact in &retired {
            resolver.end_contact(&mut targets, contact);
        }
    }

    /// Run one whole frame and report the level outcome
    pub fn advance<S: Simulation>(
        &mut self,
        sim: &mut S,
        dt: f32,
        intent: &PlayerIntent,
    ) -> LevelSignals {
        if self.pre_update(sim) {
            self.update(sim, intent);
            sim.step(dt, self);
            self.post_step(sim);
        }
        self.signals
    }

    /// Tear the level down and populate it again from its description
    ///
    /// Enters through the return spawn when the return goal was reached.
    pub fn reset(&mut self, world: &mut dyn PhysicsWorld) -> Result<(), LevelError> {
        let via_return = self.signals.contains(LevelSignals::RETURN_REACHED);

        let mut ctx = WorldContext::new(world, &mut self.fixtures, &mut self.joints);
        self.corpses.clear(&mut ctx);
        for body in self.bodies.drain(..) {
            ctx.fixtures.destroy_body(ctx.world, body);
        }
        ctx.fixtures.clear();
        ctx.joints.clear();
        self.joint_queue.clear();

        let populated =
            builder::populate(&self.desc, &self.constants, &self.config, &mut ctx, via_return)?;

        self.resolver = ContactResolver::new(populated.player.body());
        self.contacts.clear();
        self.player = populated.player;
        self.respawn_point = populated.respawn_point;
        self.activation = populated.activation;
        self.objects = populated.objects;
        self.lasers = populated.lasers;
        self.corpse_template = populated.corpse_template;
        self.bodies = populated.bodies;
        self.mortality.reset();
        self.signals = LevelSignals::empty();
        self.frame = 0;

        info!(
            "Level reset{}",
            if via_return { " through the return goal" } else { "" }
        );
        Ok(())
    }

    fn contact_parts(&mut self) -> (&mut ContactResolver, ContactTargets<'_>) {
        (
            &mut self.resolver,
            ContactTargets {
                fixtures: &self.fixtures,
                player: &mut self.player,
                mortality: &mut self.mortality,
                activation: &mut self.activation,
                objects: &self.objects,
                corpses: &mut self.corpses,
                joint_queue: &mut self.joint_queue,
                signals: &mut self.signals,
            },
        )
    }

    /// Outcome flags raised so far
    pub fn signals(&self) -> LevelSignals {
        self.signals
    }

    /// The player
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Lives and death latch
    pub fn mortality(&self) -> &Mortality {
        &self.mortality
    }

    /// Corpses left in the level
    pub fn corpses(&self) -> &CorpseList {
        &self.corpses
    }

    /// Activatable objects
    pub fn objects(&self) -> &LevelObjects {
        &self.objects
    }

    /// Activatables as a renderer sees them
    pub fn object_views<'a>(
        &'a self,
        world: &'a dyn PhysicsWorld,
    ) -> impl Iterator<Item = ObjectView> + 'a {
        self.objects.iter().map(move |(key, object)| ObjectView {
            key,
            kind: object.kind_name(),
            activated: object.is_activated(),
            position: world.position(object.body()),
        })
    }

    /// Activators and their relations
    pub fn activation(&self) -> &ActivationGraph {
        &self.activation
    }

    /// Laser beams
    pub fn lasers(&self) -> &[LaserBeam] {
        &self.lasers
    }

    /// Joint requests waiting for [`Level::post_step`]
    pub fn joint_queue(&self) -> &JointQueue {
        &self.joint_queue
    }

    /// Gameplay-owned joints
    pub fn joints(&self) -> &JointArena {
        &self.joints
    }

    /// Fixture tags
    pub fn fixtures(&self) -> &FixtureRegistry {
        &self.fixtures
    }

    /// Fixture pairs currently touching
    pub fn open_contacts(&self) -> &OpenContacts {
        &self.contacts
    }

    /// Contact dispatcher
    pub fn resolver(&self) -> &ContactResolver {
        &self.resolver
    }

    /// Where the player reappears after a death
    pub fn respawn_point(&self) -> Point2 {
        self.respawn_point
    }

    /// Frames completed since build or reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Rules in effect
    pub fn config(&self) -> &GameplayConfig {
        &self.config
    }
}

impl ContactListener for Level {
    fn begin_contact(&mut self, contact: &Contact) {
        self.contacts.begin(contact);
        let (resolver, mut targets) = self.contact_parts();
        resolver.begin_contact(&mut targets, contact);
    }

    fn end_contact(&mut self, contact: &Contact) {
        if !self.contacts.end(contact) {
            debug!(
                "Ignoring end-contact for {:?}/{:?}, already closed",
                contact.a.fixture, contact.b.fixture
            );
            return;
        }
        let (resolver, mut targets) = self.contact_parts();
        resolver.end_contact(&mut targets, contact);
    }
}
