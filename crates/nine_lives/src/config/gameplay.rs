//! Level-independent gameplay rules

use serde::{Deserialize, Serialize};

use super::Config;

/// Gameplay rules shared by every level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Lives at level start; reaching zero fails the level
    pub max_lives: u32,
    
    /// Ticks a burning corpse survives before it is removed
    pub corpse_burn_ticks: u32,
    
    /// World Y below which the player has fallen out of the level
    pub fall_threshold_y: f32,
    
    /// Linear damping applied to freshly spawned corpses
    pub corpse_linear_damping: f32,
    
    /// Hold-open duration (frames) for timed buttons that do not author one
    pub default_timed_duration: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            max_lives: 4,
            corpse_burn_ticks: 1800,
            fall_threshold_y: -1.0,
            corpse_linear_damping: 2.0,
            default_timed_duration: 120,
        }
    }
}

impl Config for GameplayConfig {}
