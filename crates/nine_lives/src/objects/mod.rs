//! Level objects
//!
//! Activatable obstacles are stored in one slot map keyed by [`ObjectKey`]
//! and dispatched through the [`LevelObject`] enum. Lasers are passive
//! hazards; corpses live in their own [`CorpseList`].

pub mod dead_body;
pub mod flamethrower;
pub mod laser;
pub mod pushable_box;
pub mod spikes;

use slotmap::{new_key_type, SlotMap};

use crate::activation::{Activatable, Activation};
use crate::physics::{BodyHandle, WorldContext};

pub use dead_body::{CorpseKey, CorpseList, CorpseSpawn, CorpseTemplate, DeadBody};
pub use flamethrower::Flamethrower;
pub use laser::LaserBeam;
pub use pushable_box::PushableBox;
pub use spikes::{SpikeOrientation, Spikes, SpikesFixtures};

new_key_type! {
    /// Key of an activatable object in [`LevelObjects`]
    pub struct ObjectKey;
}

/// Storage for every activatable object of a level
pub type LevelObjects = SlotMap<ObjectKey, LevelObject>;

/// An activatable obstacle
#[derive(Debug)]
pub enum LevelObject {
    /// Spikes that kill on touch and pin corpses
    Spikes(Spikes),
    /// Box that freezes in place while active
    PushableBox(PushableBox),
    /// Flamethrower whose flame burns corpses
    Flamethrower(Flamethrower),
}

impl LevelObject {
    /// Body of the object
    pub fn body(&self) -> BodyHandle {
        match self {
            Self::Spikes(spikes) => spikes.body(),
            Self::PushableBox(crate_box) => crate_box.body(),
            Self::Flamethrower(flamethrower) => flamethrower.body(),
        }
    }

    /// Short name for logs and debug views
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Spikes(_) => "spikes",
            Self::PushableBox(_) => "box",
            Self::Flamethrower(_) => "flamethrower",
        }
    }

    /// The spikes inside, if any
    pub fn as_spikes(&self) -> Option<&Spikes> {
        match self {
            Self::Spikes(spikes) => Some(spikes),
            _ => None,
        }
    }

    /// The spikes inside, if any
    pub fn as_spikes_mut(&mut self) -> Option<&mut Spikes> {
        match self {
            Self::Spikes(spikes) => Some(spikes),
            _ => None,
        }
    }
}

impl Activatable for LevelObject {
    fn activation(&self) -> &Activation {
        match self {
            Self::Spikes(spikes) => spikes.activation(),
            Self::PushableBox(crate_box) => crate_box.activation(),
            Self::Flamethrower(flamethrower) => flamethrower.activation(),
        }
    }

    fn activation_mut(&mut self) -> &mut Activation {
        match self {
            Self::Spikes(spikes) => spikes.activation_mut(),
            Self::PushableBox(crate_box) => crate_box.activation_mut(),
            Self::Flamethrower(flamethrower) => flamethrower.activation_mut(),
        }
    }

    fn on_activated(&mut self, ctx: &mut WorldContext<'_>) {
        match self {
            Self::Spikes(spikes) => spikes.on_activated(ctx),
            Self::PushableBox(crate_box) => crate_box.on_activated(ctx),
            Self::Flamethrower(flamethrower) => flamethrower.on_activated(ctx),
        }
    }

    fn on_deactivated(&mut self, ctx: &mut WorldContext<'_>) {
        match self {
            Self::Spikes(spikes) => spikes.on_deactivated(ctx),
            Self::PushableBox(crate_box) => crate_box.on_deactivated(ctx),
            Self::Flamethrower(flamethrower) => flamethrower.on_deactivated(ctx),
        }
    }
}
