//! LED cube frame generator.
//!
//! This crate generates animation frames for a 3D grid of RGB voxels (an
//! LED cube) offline and serializes them to JSON for later playback on
//! hardware or in a simulator.
//!
//! # Architecture
//!
//! - `cube`: the voxel color grid and packed-color encoding
//! - `animator`: pluggable animation strategies
//! - `animation`: serializers, artifact writers, the run controller and
//!   the playback reader
//! - `schema`: configuration types
//!
//! # Example
//!
//! ```rust,no_run
//! use ledcube_frames::{
//!     animation::{FileWriter, generate_frames},
//!     schema::{AnimationConfig, GeneratorConfig},
//! };
//!
//! let config = GeneratorConfig {
//!     width: 4,
//!     height: 4,
//!     depth: 4,
//!     animation: AnimationConfig::PlaneSweep,
//!     ..Default::default()
//! };
//!
//! let mut writer = FileWriter::new(&config.output_dir);
//! let stats = generate_frames(&config, &mut writer)?;
//! println!("{}", stats);
//! # Ok::<(), ledcube_frames::GeneratorError>(())
//! ```

pub mod animation;
pub mod animator;
pub mod cube;
pub mod error;
pub mod schema;

// Re-export commonly used types
pub use animation::{AnimationPlayer, CubeController, RunStats, generate_frames};
pub use cube::{ColorGrid, Dimensions, Rgb};
pub use error::{GeneratorError, Result};
pub use schema::{AnimationConfig, GeneratorConfig, SerializerConfig};
