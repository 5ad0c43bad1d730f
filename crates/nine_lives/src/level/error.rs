//! Level construction errors

use thiserror::Error;

use crate::activation::ActivationError;
use crate::config::ConfigError;

/// Why a level could not be built
///
/// All of these are authoring mistakes; a level that fails to build never
/// starts.
#[derive(Error, Debug)]
pub enum LevelError {
    /// A constant is missing or has the wrong type
    #[error("level constants: {0}")]
    Config(#[from] ConfigError),

    /// Activator wiring is inconsistent
    #[error(transparent)]
    Activation(#[from] ActivationError),

    /// Spikes must sit at a right angle
    #[error("spikes #{index} at ({x}, {y}) are rotated {angle} degrees; only multiples of 90 are supported")]
    UnalignedSpikes {
        /// Position in the description
        index: usize,
        /// X position
        x: f32,
        /// Y position
        y: f32,
        /// Authored angle in degrees
        angle: f32,
    },

    /// A wall or platform outline cannot form a polygon
    #[error("{kind} #{index} has {vertices} vertices, at least 3 are needed")]
    DegeneratePolygon {
        /// `"wall"` or `"platform"`
        kind: &'static str,
        /// Position in the description
        index: usize,
        /// Vertices found
        vertices: usize,
    },

    /// A laser cannot be laid out in a bounded number of planks
    #[error("laser #{index} of length {length} with {plank_width}x{plank_height} planks is not a finite beam of at most {max_planks} planks")]
    InvalidLaser {
        /// Position in the description
        index: usize,
        /// Authored length
        length: f32,
        /// Plank width from the constants
        plank_width: f32,
        /// Plank height from the constants
        plank_height: f32,
        /// Upper bound on planks per beam
        max_planks: u16,
    },
}
