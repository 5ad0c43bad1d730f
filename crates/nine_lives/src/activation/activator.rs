//! Activators
//!
//! An activator counts the fixtures currently pressing it. Contact callbacks
//! only move the counter; the boolean output is recomputed once per frame by
//! [`Activator::tick`].
//!
//! A press that starts and ends inside the same step still registers on the
//! next tick: `add_press` latches a tap flag that `tick` consumes.

use log::error;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::physics::BodyHandle;

new_key_type! {
    /// Key of an activator in the [`ActivationGraph`](super::ActivationGraph)
    pub struct ActivatorKey;
}

/// How an activator turns presses into output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivatorKind {
    /// Active while pressed
    Momentary,
    /// Toggles on each new press
    Latching {
        /// Whether the previous tick saw a press
        was_pressed: bool,
    },
    /// Stays active for `duration` ticks after the last press
    Timed {
        /// Countdown length in ticks
        duration: u32,
        /// Ticks left on the countdown
        remaining: u32,
    },
}

/// A trigger that produces a boolean signal
#[derive(Debug, Clone)]
pub struct Activator {
    id: String,
    kind: ActivatorKind,
    pressing: u32,
    tapped: bool,
    active: bool,
    body: Option<BodyHandle>,
}

impl Activator {
    fn new(id: impl Into<String>, kind: ActivatorKind) -> Self {
        Self {
            id: id.into(),
            kind,
            pressing: 0,
            tapped: false,
            active: false,
            body: None,
        }
    }

    /// Button: active exactly while something presses it
    pub fn momentary(id: impl Into<String>) -> Self {
        Self::new(id, ActivatorKind::Momentary)
    }

    /// Switch: flips its output on each rising edge of the press state
    pub fn latching(id: impl Into<String>) -> Self {
        Self::new(id, ActivatorKind::Latching { was_pressed: false })
    }

    /// Timed button: output holds for `duration` ticks after release
    pub fn timed(id: impl Into<String>, duration: u32) -> Self {
        Self::new(
            id,
            ActivatorKind::Timed {
                duration,
                remaining: 0,
            },
        )
    }

    /// Attach the body carrying the press sensor
    #[must_use]
    pub fn with_body(mut self, body: BodyHandle) -> Self {
        self.body = Some(body);
        self
    }

    /// Identifier activatables refer to
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Behavior variant and its state
    pub fn kind(&self) -> ActivatorKind {
        self.kind
    }

    /// Body carrying the press sensor
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// Output computed on the last tick
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether anything presses the activator right now
    pub fn is_pressed(&self) -> bool {
        self.pressing > 0
    }

    /// Number of fixtures pressing the activator
    pub fn pressing_count(&self) -> u32 {
        self.pressing
    }

    /// A fixture started pressing
    pub fn add_press(&mut self) {
        self.pressing += 1;
        self.tapped = true;
    }

    /// A fixture stopped pressing
    ///
    /// Unmatched removals are a contact bookkeeping bug. Debug builds stop
    /// here; release builds log and keep the counter at zero.
    pub fn remove_press(&mut self) {
        debug_assert!(self.pressing > 0, "activator '{}' released more than pressed", self.id);
        if self.pressing == 0 {
            error!("Activator '{}' released more than pressed", self.id);
            return;
        }
        self.pressing -= 1;
    }

    /// Recompute the output for this frame
    ///
    /// Returns `true` when the output changed.
    pub fn tick(&mut self) -> bool {
        let pressed = self.pressing > 0 || self.tapped;
        self.tapped = false;

        let active = match &mut self.kind {
            ActivatorKind::Momentary => self.pressing > 0,
            ActivatorKind::Latching { was_pressed } => {
                let rising = pressed && !*was_pressed;
                *was_pressed = pressed;
                if rising {
                    !self.active
                } else {
                    self.active
                }
            }
            ActivatorKind::Timed {
                duration,
                remaining,
            } => {
                if pressed {
                    *remaining = *duration;
                } else {
                    *remaining = remaining.saturating_sub(1);
                }
                *remaining > 0
            }
        };

        let changed = active != self.active;
        self.active = active;
        changed
    }
}
