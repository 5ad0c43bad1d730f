//! Effective state of an activatable object
//!
//! Every activatable carries an authored `initial_activation`. The incoming
//! signal is XORed with it, so an object authored as active is switched *off*
//! by a pressed activator, and an object authored as inactive is switched on.

use crate::physics::WorldContext;

/// Edge produced when the effective state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Inactive → active
    Activated,
    /// Active → inactive
    Deactivated,
}

/// Activation state with XOR hysteresis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Activation {
    activated: bool,
    initial_activation: bool,
}

impl Activation {
    /// Start in the authored state
    pub fn new(initial_activation: bool) -> Self {
        Self {
            activated: initial_activation,
            initial_activation,
        }
    }

    /// Current effective state
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Authored state
    pub fn initial_activation(&self) -> bool {
        self.initial_activation
    }

    /// Fold a signal into the state
    ///
    /// The target state is `signal != initial_activation`. Returns the edge
    /// when the state changed, `None` otherwise.
    pub fn apply_signal(&mut self, signal: bool) -> Option<Transition> {
        let target = signal != self.initial_activation;
        if target == self.activated {
            return None;
        }

        self.activated = target;
        Some(if target {
            Transition::Activated
        } else {
            Transition::Deactivated
        })
    }
}

/// Object whose presence or behavior is driven by an activator
pub trait Activatable {
    /// Activation state
    fn activation(&self) -> &Activation;

    /// Mutable activation state
    fn activation_mut(&mut self) -> &mut Activation;

    /// Hook run on the inactive → active edge
    fn on_activated(&mut self, ctx: &mut WorldContext<'_>);

    /// Hook run on the active → inactive edge
    fn on_deactivated(&mut self, ctx: &mut WorldContext<'_>);

    /// Current effective state
    fn is_activated(&self) -> bool {
        self.activation().is_activated()
    }

    /// Push an activator's output into this object
    ///
    /// Runs at most one hook, and only when the effective state changes.
    fn set_signal(&mut self, signal: bool, ctx: &mut WorldContext<'_>) -> Option<Transition> {
        let transition = self.activation_mut().apply_signal(signal)?;
        match transition {
            Transition::Activated => self.on_activated(ctx),
            Transition::Deactivated => self.on_deactivated(ctx),
        }
        Some(transition)
    }
}
