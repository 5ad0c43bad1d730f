//! Gameplay classification of fixtures
//!
//! Every fixture the core creates is tagged with a [`FixtureTag`] at creation
//! time. Contact resolution is a single registry lookup per endpoint instead
//! of probing what kind of object a body belongs to.

use slotmap::SecondaryMap;

use super::{BodyHandle, FixtureDef, FixtureHandle, PhysicsWorld};
use crate::activation::ActivatorKey;
use crate::objects::{CorpseKey, ObjectKey};

/// What a fixture means to gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureTag {
    /// Walls, platforms, solid parts of obstacles
    Terrain,
    /// Player collision shape
    PlayerBody,
    /// Thin sensor under the player's feet
    PlayerGroundSensor,
    /// Sensors on the player's flanks
    PlayerSideSensor,
    /// Level exit
    Goal,
    /// Secondary exit leading back to the previous level
    ReturnGoal,
    /// Hazard sensor of a spikes object
    Spikes(ObjectKey),
    /// Hazard sensor of a flamethrower's flame
    Flame(ObjectKey),
    /// Laser beam plank
    LaserBeam,
    /// Any fixture of a corpse
    Corpse(CorpseKey),
    /// Press sensor of an activator
    Activator(ActivatorKey),
}

/// Hazard classification of a tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardKind {
    /// Spikes; corpses get welded on contact
    Spikes(ObjectKey),
    /// Flame; corpses start burning on contact
    Flame(ObjectKey),
    /// Laser beam
    Laser,
}

impl FixtureTag {
    /// Hazard kind, if touching this fixture kills the player
    pub fn hazard(self) -> Option<HazardKind> {
        match self {
            Self::Spikes(key) => Some(HazardKind::Spikes(key)),
            Self::Flame(key) => Some(HazardKind::Flame(key)),
            Self::LaserBeam => Some(HazardKind::Laser),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TaggedFixture {
    body: BodyHandle,
    tag: FixtureTag,
    live: bool,
}

/// Fixture handle → tag lookup
///
/// Destroyed fixtures keep their tag until [`clear`](Self::clear): the
/// simulation may still report an end-contact for a fixture that was removed
/// between steps, and that event has to be classified like any other.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    fixtures: SecondaryMap<FixtureHandle, TaggedFixture>,
}

impl FixtureRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fixture in the world and remember its tag
    pub fn create(
        &mut self,
        world: &mut dyn PhysicsWorld,
        body: BodyHandle,
        def: &FixtureDef,
        tag: FixtureTag,
    ) -> FixtureHandle {
        let fixture = world.create_fixture(body, def);
        self.fixtures.insert(
            fixture,
            TaggedFixture {
                body,
                tag,
                live: true,
            },
        );
        fixture
    }

    /// Destroy a fixture
    pub fn destroy(&mut self, world: &mut dyn PhysicsWorld, fixture: FixtureHandle) {
        if let Some(tagged) = self.fixtures.get_mut(fixture) {
            tagged.live = false;
        }
        world.destroy_fixture(fixture);
    }

    /// Destroy a body together with all its fixtures
    pub fn destroy_body(&mut self, world: &mut dyn PhysicsWorld, body: BodyHandle) {
        for (_, tagged) in self.fixtures.iter_mut() {
            if tagged.body == body {
                tagged.live = false;
            }
        }
        world.destroy_body(body);
    }

    /// Tag of a fixture, live or destroyed
    pub fn tag(&self, fixture: FixtureHandle) -> Option<FixtureTag> {
        self.fixtures.get(fixture).map(|tagged| tagged.tag)
    }

    /// Whether the fixture still exists in the world
    pub fn is_live(&self, fixture: FixtureHandle) -> bool {
        self.fixtures.get(fixture).map_or(false, |tagged| tagged.live)
    }

    /// Live fixtures carrying `tag`
    pub fn tagged(&self, tag: FixtureTag) -> impl Iterator<Item = FixtureHandle> + '_ {
        self.fixtures
            .iter()
            .filter(move |(_, tagged)| tagged.live && tagged.tag == tag)
            .map(|(fixture, _)| fixture)
    }

    /// Number of live fixtures
    pub fn len(&self) -> usize {
        self.fixtures.values().filter(|tagged| tagged.live).count()
    }

    /// Whether no live fixture is registered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget everything (the world is being torn down separately)
    pub fn clear(&mut self) {
        self.fixtures.clear();
    }
}
