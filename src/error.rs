//! Error types for frame generation, serialization and persistence.

use std::io;
use std::path::PathBuf;

use crate::cube::Dimensions;
use crate::schema::ConfigError;

/// Errors raised while generating, encoding or persisting frames.
///
/// Every variant is fatal: a run is single-pass and aborts on the first
/// error.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("Voxel ({x}, {y}, {z}) is outside grid {dimensions}")]
    OutOfBounds {
        x: usize,
        y: usize,
        z: usize,
        dimensions: Dimensions,
    },
    #[error("Channel {channel} value {value} is outside [0, 1]")]
    UnsupportedColorRange { channel: char, value: f32 },
    #[error("Could not load reference image {}: {source}", path.display())]
    MissingResource {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Could not write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Could not read {}: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot {operation} while controller is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },
    #[error("Malformed animation document: {0}")]
    Playback(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GeneratorError>;
