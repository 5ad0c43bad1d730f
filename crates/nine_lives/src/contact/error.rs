//! Errors raised while classifying a single contact

use thiserror::Error;

use crate::activation::ActivatorKey;
use crate::objects::{CorpseKey, ObjectKey};
use crate::physics::FixtureHandle;

/// Why a contact could not be resolved
///
/// These are recovered from: the contact is skipped, the rest of the step
/// proceeds.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactError {
    /// The fixture was never registered with a tag
    #[error("fixture {0:?} has no gameplay tag")]
    UntaggedFixture(FixtureHandle),

    /// A hazard tag names an object that is gone
    #[error("object {0:?} no longer exists")]
    MissingObject(ObjectKey),

    /// A spikes tag names an object of another kind
    #[error("object {0:?} is tagged as spikes but is not")]
    NotSpikes(ObjectKey),

    /// A corpse tag names a corpse that is gone
    #[error("corpse {0:?} no longer exists")]
    MissingCorpse(CorpseKey),

    /// An activator tag names an activator that is gone
    #[error("activator {0:?} no longer exists")]
    MissingActivator(ActivatorKey),
}
