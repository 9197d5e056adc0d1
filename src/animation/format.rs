//! JSON document shapes for generated animations.
//!
//! A frame is encoded as nested `[x][y][z]` arrays of packed `0xRRGGBB`
//! colors. Batch artifacts are a bare list of frames (`[frame][x][y][z]`);
//! streamed frames are wrapped in a [`FrameDocument`] carrying their id.

use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::cube::ColorGrid;
use crate::error::{GeneratorError, Result};

/// File extension of every JSON artifact.
pub const JSON_EXTENSION: &str = "json";

/// Prefix of streamed frame ids (`Frame_<n>`).
pub const FRAME_ID_PREFIX: &str = "Frame_";

/// One frame as nested `[x][y][z]` packed colors.
pub type PackedFrame = Vec<Vec<Vec<u32>>>;

/// A single streamed frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDocument {
    /// `Frame_<index>`.
    pub id: String,
    /// Packed colors.
    pub state: PackedFrame,
}

impl FrameDocument {
    pub fn new(index: u64, state: PackedFrame) -> Self {
        Self {
            id: format!("{}{}", FRAME_ID_PREFIX, index),
            state,
        }
    }

    /// Frame index parsed back out of the id.
    pub fn index(&self) -> Option<u64> {
        self.id.strip_prefix(FRAME_ID_PREFIX)?.parse().ok()
    }

    /// Decode the state into a grid.
    pub fn to_grid(&self) -> Result<ColorGrid> {
        ColorGrid::from_packed(&self.state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Encode a list of frames as a batch document.
pub fn encode_batch(frames: &[PackedFrame], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(frames)?
    } else {
        serde_json::to_string(frames)?
    };
    Ok(json)
}

/// Decode a batch document. Fails on anything that is not a non-empty list
/// of frames.
pub fn decode_batch<R: Read>(reader: R) -> Result<Vec<PackedFrame>> {
    let frames: Vec<PackedFrame> = serde_json::from_reader(reader)?;
    if frames.is_empty() {
        return Err(GeneratorError::Playback(
            "document contains no frames".to_string(),
        ));
    }
    Ok(frames)
}

/// `<name>.<extension>`
pub fn artifact_file_name(name: &str, extension: &str) -> String {
    format!("{}.{}", name, extension)
}

/// `<name>_frame_<index>.json`
pub fn frame_file_name(name: &str, index: u64) -> String {
    format!("{}_frame_{}.{}", name, index, JSON_EXTENSION)
}
