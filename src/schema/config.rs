//! Configuration types for frame generation runs.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::animation::{BatchJsonSerializer, FrameSerializer, StreamingJsonSerializer};
use crate::animator::{Animator, PlaneSweep, RgbSweep, RotatingImage, StaticProjection};
use crate::cube::Dimensions;

fn default_name() -> String {
    "animation".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Top-level generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Cube width in voxels (X dimension).
    pub width: usize,
    /// Cube height in voxels (Y dimension).
    pub height: usize,
    /// Cube depth in voxels (Z dimension).
    pub depth: usize,
    /// Animation name, used as the artifact file stem.
    #[serde(default = "default_name")]
    pub name: String,
    /// Existing directory that receives the artifacts.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Safety cap on recorded frames (None = trust the animator's stop condition).
    #[serde(default)]
    pub max_frames: Option<u64>,
    /// Animation strategy.
    pub animation: AnimationConfig,
    /// Output encoding.
    #[serde(default)]
    pub serializer: SerializerConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            width: 8,
            height: 8,
            depth: 8,
            name: default_name(),
            output_dir: default_output_dir(),
            max_frames: None,
            animation: AnimationConfig::PlaneSweep,
            serializer: SerializerConfig::default(),
        }
    }
}

/// Available animation strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AnimationConfig {
    /// White plane moving along X, one column per frame.
    PlaneSweep,
    /// Red column with a green/blue trail moving along X.
    RgbSweep,
    /// Reference image projected on the middle plane, rotating around Y.
    RotatingImage {
        /// Path to the reference image.
        image: PathBuf,
    },
    /// Reference image extruded through the whole cube along one axis.
    StaticProjection {
        /// Path to the reference image.
        image: PathBuf,
        /// Extrusion axis.
        #[serde(default)]
        axis: Axis,
    },
}

/// Output encoding for generated frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SerializerConfig {
    /// One document holding every frame.
    Batch {
        /// Pretty-print the document.
        #[serde(default)]
        pretty: bool,
    },
    /// One document per frame, written as it is generated.
    Streaming,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        SerializerConfig::Batch { pretty: false }
    }
}

/// Cube axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    #[default]
    Z,
}

impl GeneratorConfig {
    /// Cube dimensions.
    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.width, self.height, self.depth)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.dimensions().validate()?;
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.max_frames == Some(0) {
            return Err(ConfigError::InvalidFrameCap);
        }
        if let AnimationConfig::RotatingImage { .. } = self.animation {
            if self.width != self.depth {
                return Err(ConfigError::UnsupportedAxis {
                    width: self.width,
                    depth: self.depth,
                });
            }
        }
        Ok(())
    }

    /// Construct the configured animator. Image loading happens later, in
    /// [`Animator::setup`].
    pub fn build_animator(&self) -> Box<dyn Animator> {
        match &self.animation {
            AnimationConfig::PlaneSweep => Box::new(PlaneSweep::new()),
            AnimationConfig::RgbSweep => Box::new(RgbSweep::new()),
            AnimationConfig::RotatingImage { image } => Box::new(RotatingImage::new(image)),
            AnimationConfig::StaticProjection { image, axis } => {
                Box::new(StaticProjection::new(image, *axis))
            }
        }
    }

    /// Construct the configured serializer.
    pub fn build_serializer(&self) -> Box<dyn FrameSerializer> {
        match self.serializer {
            SerializerConfig::Batch { pretty } => Box::new(BatchJsonSerializer::new(pretty)),
            SerializerConfig::Streaming => Box::new(StreamingJsonSerializer::new()),
        }
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(source: &str) -> Result<Self, ConfigError> {
        let config: GeneratorConfig =
            serde_json::from_str(source).map_err(|e| ConfigError::InvalidSource(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cube dimensions (width, height, depth) must be non-zero")]
    InvalidDimensions,
    #[error("Animation name must not be empty")]
    EmptyName,
    #[error("Frame cap must be at least 1")]
    InvalidFrameCap,
    #[error("Rotating animations need width == depth (got {width} and {depth})")]
    UnsupportedAxis { width: usize, depth: usize },
    #[error("Invalid configuration: {0}")]
    InvalidSource(String),
}
