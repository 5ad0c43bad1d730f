//! In-memory level description
//!
//! Plain data handed to [`Level::build`](super::Level::build). How it was
//! produced is up to the caller; it can be loaded through [`Config`] like any
//! other serde type. Positions are world coordinates, angles are degrees.

use serde::{Deserialize, Serialize};

use crate::config::Config;

/// Everything placed in a level
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesc {
    /// Player spawn points
    pub player: PlayerDesc,
    /// Exit
    pub goal: Option<DoorDesc>,
    /// Exit back to the previous level
    pub return_goal: Option<DoorDesc>,
    /// Static outlines, flat `[x0, y0, x1, y1, ...]`
    pub walls: Vec<Vec<f32>>,
    /// Static outlines, flat `[x0, y0, x1, y1, ...]`
    pub platforms: Vec<Vec<f32>>,
    /// Buttons, switches and timed buttons
    pub activators: Vec<ActivatorDesc>,
    /// Spikes
    pub spikes: Vec<SpikesDesc>,
    /// Pushable boxes
    pub boxes: Vec<BoxDesc>,
    /// Flamethrowers
    pub flamethrowers: Vec<FlamethrowerDesc>,
    /// Laser beams
    pub lasers: Vec<LaserDesc>,
}

impl Config for LevelDesc {}

/// Where the player appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerDesc {
    /// Spawn and respawn point
    pub spawn: [f32; 2],
    /// Spawn point when entering through the return goal
    #[serde(default)]
    pub return_spawn: Option<[f32; 2]>,
}

impl Default for PlayerDesc {
    fn default() -> Self {
        Self {
            spawn: [1.0, 1.0],
            return_spawn: None,
        }
    }
}

/// A goal sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorDesc {
    /// Centre
    pub position: [f32; 2],
    /// Width and height
    pub size: [f32; 2],
}

/// Activator behavior as authored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivatorType {
    /// Momentary
    Button,
    /// Latching
    Switch,
    /// Timed
    Timed,
}

/// An activator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatorDesc {
    /// Behavior
    #[serde(rename = "type")]
    pub kind: ActivatorType,
    /// Id activatables refer to
    pub id: String,
    /// Centre of the base
    pub position: [f32; 2],
    /// Hold duration in frames, timed buttons only
    #[serde(default)]
    pub duration: Option<u32>,
}

/// Spikes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpikesDesc {
    /// Centre
    pub position: [f32; 2],
    /// Rotation, a multiple of 90
    #[serde(default)]
    pub angle: f32,
    /// Initial activation
    #[serde(default)]
    pub active: bool,
    /// Driving activator
    #[serde(default)]
    pub activator: Option<String>,
}

/// Pushable box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxDesc {
    /// Centre
    pub position: [f32; 2],
    /// Initial activation
    #[serde(default)]
    pub active: bool,
    /// Driving activator
    #[serde(default)]
    pub activator: Option<String>,
    /// Overrides the box density constant
    #[serde(default)]
    pub density: Option<f32>,
    /// Overrides the box friction constant
    #[serde(default)]
    pub friction: Option<f32>,
}

/// Flamethrower
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlamethrowerDesc {
    /// Centre of the base
    pub position: [f32; 2],
    /// Initial activation
    #[serde(default)]
    pub active: bool,
    /// Driving activator
    #[serde(default)]
    pub activator: Option<String>,
}

/// Laser beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaserDesc {
    /// Emitter position
    pub position: [f32; 2],
    /// Beam direction
    #[serde(default)]
    pub angle: f32,
    /// Beam length
    pub length: f32,
}
