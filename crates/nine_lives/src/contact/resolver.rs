//! Begin/end-contact dispatch
//!
//! Each event is handled in two passes. Classification looks up both
//! fixture tags and every key they reference and produces a list of
//! effects; nothing is mutated yet, so a contact that fails to classify
//! leaves no partial state behind. Application then folds the effects into
//! the targets and cannot fail.
//!
//! The resolver never sees the world. Joints it wants are pushed to the
//! [`JointQueue`] and built after the step.

use log::{debug, info, warn};

use super::{ContactError, SensorRegistry};
use crate::activation::{ActivationGraph, ActivatorKey};
use crate::foundation::math::Point2;
use crate::level::LevelSignals;
use crate::mortality::{DeathOutcome, Mortality};
use crate::objects::{CorpseKey, CorpseList, CorpseSpawn, LevelObjects};
use crate::physics::{
    BodyHandle, Contact, ContactEndpoint, FixtureHandle, FixtureRegistry, FixtureTag, HazardKind,
    JointQueue, PendingJoint, WeldJointDef,
};
use crate::player::Player;

/// Gameplay state a contact may touch
pub struct ContactTargets<'a> {
    /// Fixture tags
    pub fixtures: &'a FixtureRegistry,
    /// The player
    pub player: &'a mut Player,
    /// Lives and death latch
    pub mortality: &'a mut Mortality,
    /// Activators
    pub activation: &'a mut ActivationGraph,
    /// Activatable objects
    pub objects: &'a LevelObjects,
    /// Corpses
    pub corpses: &'a mut CorpseList,
    /// Joints to build after the step
    pub joint_queue: &'a mut JointQueue,
    /// Level outcome flags
    pub signals: &'a mut LevelSignals,
}

/// One state change produced by a contact
#[derive(Debug, Clone, PartialEq)]
enum Effect {
    Grounded(FixtureHandle),
    Ungrounded(FixtureHandle),
    WallEnter,
    WallExit,
    Complete,
    ReturnReached,
    Kill(CorpseSpawn),
    Weld(PendingJoint),
    Burning(CorpseKey, bool),
    Press(ActivatorKey),
    Release(ActivatorKey),
}

/// The player's endpoint and the other endpoint of a contact
struct PlayerPair<'c> {
    me: &'c ContactEndpoint,
    my_tag: FixtureTag,
    other: &'c ContactEndpoint,
    other_tag: FixtureTag,
}

/// A corpse touching a hazard
struct CorpseHazard<'c> {
    corpse: CorpseKey,
    corpse_end: &'c ContactEndpoint,
    hazard: HazardKind,
    hazard_end: &'c ContactEndpoint,
}

/// Contact dispatcher for one level
#[derive(Debug, Clone)]
pub struct ContactResolver {
    player_body: BodyHandle,
    ground_contacts: SensorRegistry,
    skipped: usize,
}

impl ContactResolver {
    /// Resolver for a level whose player owns `player_body`
    pub fn new(player_body: BodyHandle) -> Self {
        Self {
            player_body,
            ground_contacts: SensorRegistry::new(),
            skipped: 0,
        }
    }

    /// Body the resolver treats as the player
    pub fn player_body(&self) -> BodyHandle {
        self.player_body
    }

    /// Fixtures under the player's feet
    pub fn ground_contacts(&self) -> &SensorRegistry {
        &self.ground_contacts
    }

    /// Contacts dropped because they could not be classified
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Two fixtures started touching
    pub fn begin_contact(&mut self, targets: &mut ContactTargets<'_>, contact: &Contact) {
        match self.classify_begin(targets, contact) {
            Ok(effects) => self.apply(targets, effects),
            Err(err) => {
                self.skipped += 1;
                warn!("Skipping begin-contact: {}", err);
            }
        }
    }

    /// Two fixtures stopped touching
    pub fn end_contact(&mut self, targets: &mut ContactTargets<'_>, contact: &Contact) {
        match self.classify_end(targets, contact) {
            Ok(effects) => self.apply(targets, effects),
            Err(err) => {
                self.skipped += 1;
                warn!("Skipping end-contact: {}", err);
            }
        }
    }

    fn tags(
        fixtures: &FixtureRegistry,
        contact: &Contact,
    ) -> Result<(FixtureTag, FixtureTag), ContactError> {
        let tag_a = fixtures
            .tag(contact.a.fixture)
            .ok_or(ContactError::UntaggedFixture(contact.a.fixture))?;
        let tag_b = fixtures
            .tag(contact.b.fixture)
            .ok_or(ContactError::UntaggedFixture(contact.b.fixture))?;
        Ok((tag_a, tag_b))
    }

    fn player_pair<'c>(
        &self,
        contact: &'c Contact,
        tag_a: FixtureTag,
        tag_b: FixtureTag,
    ) -> Option<PlayerPair<'c>> {
        if contact.a.body == self.player_body {
            Some(PlayerPair {
                me: &contact.a,
                my_tag: tag_a,
                other: &contact.b,
                other_tag: tag_b,
            })
        } else if contact.b.body == self.player_body {
            Some(PlayerPair {
                me: &contact.b,
                my_tag: tag_b,
                other: &contact.a,
                other_tag: tag_a,
            })
        } else {
            None
        }
    }

    fn corpse_hazard(contact: &Contact, tag_a: FixtureTag, tag_b: FixtureTag) -> Option<CorpseHazard<'_>> {
        match (tag_a, tag_b.hazard(), tag_b, tag_a.hazard()) {
            (FixtureTag::Corpse(corpse), Some(hazard), _, _) => Some(CorpseHazard {
                corpse,
                corpse_end: &contact.a,
                hazard,
                hazard_end: &contact.b,
            }),
            (_, _, FixtureTag::Corpse(corpse), Some(hazard)) => Some(CorpseHazard {
                corpse,
                corpse_end: &contact.b,
                hazard,
                hazard_end: &contact.a,
            }),
            _ => None,
        }
    }

    fn classify_begin(
        &self,
        targets: &ContactTargets<'_>,
        contact: &Contact,
    ) -> Result<Vec<Effect>, ContactError> {
        let (tag_a, tag_b) = Self::tags(targets.fixtures, contact)?;
        let mut effects = Vec::new();

        if let Some(pair) = self.player_pair(contact, tag_a, tag_b) {
            let other_is_player = pair.other.body == self.player_body;
            match pair.my_tag {
                FixtureTag::PlayerGroundSensor if !other_is_player => {
                    effects.push(Effect::Grounded(pair.other.fixture));
                }
                FixtureTag::PlayerSideSensor if !other_is_player => {
                    effects.push(Effect::WallEnter);
                }
                _ => {}
            }

            match pair.other_tag {
                FixtureTag::Goal => effects.push(Effect::Complete),
                FixtureTag::ReturnGoal => effects.push(Effect::ReturnReached),
                tag if tag.hazard().is_some() => {
                    let position = Point2::from(pair.me.transform.translation.vector);
                    effects.push(Effect::Kill(
                        targets.player.corpse_spawn(position, pair.me.linear_velocity),
                    ));
                }
                _ => {}
            }
        }

        if let Some(hit) = Self::corpse_hazard(contact, tag_a, tag_b) {
            if !targets.corpses.contains(hit.corpse) {
                return Err(ContactError::MissingCorpse(hit.corpse));
            }
            match hit.hazard {
                HazardKind::Spikes(key) => {
                    let spikes = targets
                        .objects
                        .get(key)
                        .ok_or(ContactError::MissingObject(key))?
                        .as_spikes()
                        .ok_or(ContactError::NotSpikes(key))?;

                    if spikes.orientation().welds_corpses() {
                        effects.extend(contact.points.iter().map(|point| {
                            Effect::Weld(PendingJoint {
                                def: WeldJointDef {
                                    body_a: hit.corpse_end.body,
                                    body_b: hit.hazard_end.body,
                                    local_anchor_a: hit.corpse_end.local_point(point),
                                    local_anchor_b: hit.hazard_end.local_point(point),
                                    collide_connected: false,
                                },
                                owner: Some(key),
                            })
                        }));
                    }
                }
                HazardKind::Flame(_) => effects.push(Effect::Burning(hit.corpse, true)),
                HazardKind::Laser => {}
            }
        }

        for tag in [tag_a, tag_b] {
            if let FixtureTag::Activator(key) = tag {
                if !targets.activation.contains(key) {
                    return Err(ContactError::MissingActivator(key));
                }
                effects.push(Effect::Press(key));
            }
        }

        Ok(effects)
    }

    fn classify_end(
        &self,
        targets: &ContactTargets<'_>,
        contact: &Contact,
    ) -> Result<Vec<Effect>, ContactError> {
        let (tag_a, tag_b) = Self::tags(targets.fixtures, contact)?;
        let mut effects = Vec::new();

        if let Some(pair) = self.player_pair(contact, tag_a, tag_b) {
            let other_is_player = pair.other.body == self.player_body;
            match pair.my_tag {
                FixtureTag::PlayerGroundSensor if !other_is_player => {
                    effects.push(Effect::Ungrounded(pair.other.fixture));
                }
                FixtureTag::PlayerSideSensor if !other_is_player => {
                    effects.push(Effect::WallExit);
                }
                _ => {}
            }
        }

        if let Some(hit) = Self::corpse_hazard(contact, tag_a, tag_b) {
            // A corpse that burned out needs no extinguishing
            if matches!(hit.hazard, HazardKind::Flame(_)) && targets.corpses.contains(hit.corpse) {
                effects.push(Effect::Burning(hit.corpse, false));
            }
        }

        for tag in [tag_a, tag_b] {
            if let FixtureTag::Activator(key) = tag {
                if !targets.activation.contains(key) {
                    return Err(ContactError::MissingActivator(key));
                }
                effects.push(Effect::Release(key));
            }
        }

        Ok(effects)
    }

    fn apply(&mut self, targets: &mut ContactTargets<'_>, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Grounded(fixture) => {
                    self.ground_contacts.add(fixture);
                    targets.player.set_grounded(true);
                }
                Effect::Ungrounded(fixture) => {
                    self.ground_contacts.remove(fixture);
                    if self.ground_contacts.is_empty() {
                        targets.player.set_grounded(false);
                    }
                }
                Effect::WallEnter => targets.player.add_wall_contact(),
                Effect::WallExit => targets.player.remove_wall_contact(),
                Effect::Complete => {
                    if !targets.signals.contains(LevelSignals::COMPLETE) {
                        info!("Goal reached");
                    }
                    targets.signals.insert(LevelSignals::COMPLETE);
                }
                Effect::ReturnReached => {
                    if !targets.signals.contains(LevelSignals::RETURN_REACHED) {
                        info!("Return goal reached");
                    }
                    targets.signals.insert(LevelSignals::RETURN_REACHED);
                }
                Effect::Kill(corpse) => match targets.mortality.die(corpse) {
                    DeathOutcome::Ignored => {}
                    DeathOutcome::Respawning => targets.player.cancel_jump(),
                    DeathOutcome::Failed => {
                        targets.player.cancel_jump();
                        targets.signals.insert(LevelSignals::FAILED);
                    }
                },
                Effect::Weld(request) => {
                    debug!("Queued corpse weld to {:?}", request.owner);
                    targets.joint_queue.push(request);
                }
                Effect::Burning(key, burning) => {
                    if let Some(corpse) = targets.corpses.get_mut(key) {
                        corpse.set_burning(burning);
                    }
                }
                Effect::Press(key) => {
                    targets.activation.press(key);
                }
                Effect::Release(key) => {
                    targets.activation.release(key);
                }
            }
        }
    }

    /// Forget all sensor state, keeping the player body
    pub fn reset(&mut self) {
        self.ground_contacts.clear();
        self.skipped = 0;
    }
}
