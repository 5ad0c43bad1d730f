//! Lives, death and respawn
//!
//! ```text
//!            hazard contact
//!   Alive ──────────────────► Dying ──┬─ lives left ──► Respawning ──► Alive
//!     │                               │                (next pre_update)
//!     │ fell out of the world         └─ no lives ────► Failed
//!     └──────────────────────────────────────────────► Failed
//! ```
//!
//! Only `Alive` reacts to a hazard, so any number of hazard contacts in the
//! same step cost exactly one life.

use log::{debug, info};

use crate::objects::CorpseSpawn;

/// Where the player is in the death cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MortalityState {
    /// Playing
    Alive,
    /// Death being processed
    Dying,
    /// Dead with lives left; respawns on the next frame
    Respawning,
    /// Out of lives or out of the world; the level has failed
    Failed,
}

/// Result of a death trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathOutcome {
    /// The player was not alive; nothing happened
    Ignored,
    /// A life was lost and a corpse is pending
    Respawning,
    /// The last life was lost
    Failed,
}

/// Lives and the death latch
#[derive(Debug, Clone)]
pub struct Mortality {
    max_lives: u32,
    lives: u32,
    state: MortalityState,
    pending: Option<CorpseSpawn>,
}

impl Mortality {
    /// Full lives, alive
    pub fn new(max_lives: u32) -> Self {
        Self {
            max_lives,
            lives: max_lives,
            state: MortalityState::Alive,
            pending: None,
        }
    }

    /// Current state
    pub fn state(&self) -> MortalityState {
        self.state
    }

    /// Lives left
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Lives at the start of a level
    pub fn max_lives(&self) -> u32 {
        self.max_lives
    }

    /// Whether the player is alive
    pub fn is_alive(&self) -> bool {
        self.state == MortalityState::Alive
    }

    /// Whether the level has failed
    pub fn is_failed(&self) -> bool {
        self.state == MortalityState::Failed
    }

    /// Corpse waiting to be admitted
    pub fn pending_corpse(&self) -> Option<&CorpseSpawn> {
        self.pending.as_ref()
    }

    /// The player touched a hazard
    pub fn die(&mut self, corpse: CorpseSpawn) -> DeathOutcome {
        if self.state != MortalityState::Alive {
            debug!("Death ignored while {:?}", self.state);
            return DeathOutcome::Ignored;
        }

        self.state = MortalityState::Dying;
        self.lives = self.lives.saturating_sub(1);

        if self.lives == 0 {
            self.lives = self.max_lives;
            self.state = MortalityState::Failed;
            info!("Out of lives");
            DeathOutcome::Failed
        } else {
            self.pending = Some(corpse);
            self.state = MortalityState::Respawning;
            info!("Lost a life, {} left", self.lives);
            DeathOutcome::Respawning
        }
    }

    /// The player fell below the world; no corpse is left behind
    ///
    /// Returns `false` when the level had already failed.
    pub fn fall_out(&mut self) -> bool {
        if self.state == MortalityState::Failed {
            return false;
        }
        self.pending = None;
        self.state = MortalityState::Failed;
        info!("Fell out of the world");
        true
    }

    /// Finish a pending respawn
    ///
    /// Returns the corpse to admit and moves back to `Alive`. Does nothing
    /// unless a respawn is pending.
    pub fn take_respawn(&mut self) -> Option<CorpseSpawn> {
        if self.state != MortalityState::Respawning {
            return None;
        }
        self.state = MortalityState::Alive;
        self.pending.take()
    }

    /// Full lives, alive, nothing pending
    pub fn reset(&mut self) {
        self.lives = self.max_lives;
        self.state = MortalityState::Alive;
        self.pending = None;
    }
}
