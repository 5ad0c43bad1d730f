//! Player controller
//!
//! The player is a single dynamic body with a ground sensor under its feet
//! and a sensor on each flank. Contact resolution owns the sensor state
//! (grounded, wall contacts); the game loop owns the intent. `apply_forces`
//! combines both once per frame before the physics step.

use log::{debug, error};

use crate::config::{ConfigError, ConstantTable};
use crate::foundation::math::{signum_or_zero, Point2, Vec2};
use crate::objects::CorpseSpawn;
use crate::physics::{BodyHandle, PhysicsWorld};

/// Debounced input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerIntent {
    /// Horizontal axis in `[-1, 1]`
    pub horizontal: f32,
    /// Vertical axis in `[-1, 1]`, used while climbing
    pub vertical: f32,
    /// Jump held
    pub jump: bool,
    /// Dash pressed
    pub dash: bool,
    /// Climb held
    pub climb: bool,
    /// Interact pressed
    pub interact: bool,
}

/// Movement constants of the player body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerTuning {
    /// Horizontal force at full input
    pub force: f32,
    /// Horizontal braking coefficient without input
    pub damping: f32,
    /// Horizontal speed cap
    pub max_speed: f32,
    /// Upward impulse of a jump
    pub jump_impulse: f32,
    /// Horizontal impulse of a dash
    pub dash_impulse: f32,
    /// Vertical speed while climbing
    pub climb_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            force: 20.0,
            damping: 10.0,
            max_speed: 5.0,
            jump_impulse: 5.5,
            dash_impulse: 6.0,
            climb_speed: 2.5,
        }
    }
}

impl PlayerTuning {
    /// Read the tuning from the player's constant table
    ///
    /// `force`, `damping`, `max_speed` and `jump_force` are required; the
    /// dash and climb values fall back to the defaults.
    pub fn from_constants(table: &ConstantTable) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            force: table.f32("force")?,
            damping: table.f32("damping")?,
            max_speed: table.f32("max_speed")?,
            jump_impulse: table.f32("jump_force")?,
            dash_impulse: table.f32_or("dash_force", defaults.dash_impulse)?,
            climb_speed: table.f32_or("climb_speed", defaults.climb_speed)?,
        })
    }
}

/// The living player
#[derive(Debug, Clone)]
pub struct Player {
    body: BodyHandle,
    tuning: PlayerTuning,
    movement: f32,
    vertical_movement: f32,
    jumping: bool,
    dashing: bool,
    climbing: bool,
    can_dash: bool,
    grounded: bool,
    wall_contacts: u32,
    facing_right: bool,
}

impl Player {
    /// Wrap an existing body
    pub fn new(body: BodyHandle, tuning: PlayerTuning) -> Self {
        Self {
            body,
            tuning,
            movement: 0.0,
            vertical_movement: 0.0,
            jumping: false,
            dashing: false,
            climbing: false,
            can_dash: true,
            grounded: false,
            wall_contacts: 0,
            facing_right: true,
        }
    }

    /// Player body
    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Movement constants
    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Horizontal force requested this frame
    pub fn movement(&self) -> f32 {
        self.movement
    }

    /// Whether the ground sensor touches anything
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Set by the contact resolver
    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    /// Whether a side sensor touches a wall
    pub fn is_walled(&self) -> bool {
        self.wall_contacts > 0
    }

    /// Side-sensor contacts currently open
    pub fn wall_contacts(&self) -> u32 {
        self.wall_contacts
    }

    /// A side sensor started touching something
    pub fn add_wall_contact(&mut self) {
        self.wall_contacts += 1;
    }

    /// A side sensor stopped touching something
    pub fn remove_wall_contact(&mut self) {
        if self.wall_contacts == 0 {
            error!("Wall contact ended more often than it began");
            return;
        }
        self.wall_contacts -= 1;
    }

    /// Whether jump is requested
    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Drop the jump request until the next intent
    pub fn cancel_jump(&mut self) {
        self.jumping = false;
    }

    /// Whether the player is climbing
    pub fn is_climbing(&self) -> bool {
        self.climbing
    }

    /// Whether dash is requested
    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    /// Facing, updated from the sign of the horizontal input
    pub fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Take this frame's input
    pub fn apply_intent(&mut self, intent: &PlayerIntent) {
        self.climbing = intent.climb && self.is_walled();
        self.movement = if self.climbing {
            0.0
        } else {
            intent.horizontal * self.tuning.force
        };
        self.vertical_movement = intent.vertical;
        self.jumping = intent.jump;
        self.dashing = intent.dash;

        if self.movement > 0.0 {
            self.facing_right = true;
        } else if self.movement < 0.0 {
            self.facing_right = false;
        }
    }

    /// Push the requested movement into the body
    pub fn apply_forces(&mut self, world: &mut dyn PhysicsWorld) {
        let Some(velocity) = world.linear_velocity(self.body) else {
            return;
        };

        if self.climbing {
            world.set_linear_velocity(
                self.body,
                Vec2::new(0.0, signum_or_zero(self.vertical_movement) * self.tuning.climb_speed),
            );
        } else {
            if self.movement == 0.0 {
                world.apply_force(self.body, Vec2::new(-self.tuning.damping * velocity.x, 0.0));
            }
            if velocity.x.abs() >= self.tuning.max_speed {
                world.set_linear_velocity(
                    self.body,
                    Vec2::new(signum_or_zero(self.movement) * self.tuning.max_speed, velocity.y),
                );
            } else {
                world.apply_force(self.body, Vec2::new(self.movement, 0.0));
            }
        }

        if self.jumping && self.grounded {
            world.apply_linear_impulse(self.body, Vec2::new(0.0, self.tuning.jump_impulse));
        }

        if self.grounded {
            self.can_dash = true;
        }
        if self.dashing && self.can_dash {
            let direction = if self.facing_right { 1.0 } else { -1.0 };
            world.apply_linear_impulse(self.body, Vec2::new(direction * self.tuning.dash_impulse, 0.0));
            self.can_dash = false;
            debug!("Dash");
        }
    }

    /// State a corpse inherits when the player dies here
    pub fn corpse_spawn(&self, position: Point2, velocity: Vec2) -> CorpseSpawn {
        CorpseSpawn {
            position,
            velocity,
            facing_right: self.facing_right,
        }
    }

    /// Move the body to `position` at rest
    pub fn teleport(&mut self, world: &mut dyn PhysicsWorld, position: Point2) {
        world.set_position(self.body, position);
        world.set_linear_velocity(self.body, Vec2::zeros());
        self.jumping = false;
        self.dashing = false;
        self.climbing = false;
    }
}
