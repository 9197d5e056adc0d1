//! Frame serializers: batch (one aggregate document) and streaming (one
//! document per frame).

use super::format::{FrameDocument, JSON_EXTENSION, PackedFrame, encode_batch};
use crate::cube::ColorGrid;
use crate::error::Result;

/// One frame encoded as its own document.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedFrame {
    /// Sequential frame id, starting at 0.
    pub index: u64,
    /// Serialized document.
    pub content: String,
}

/// Converts grid snapshots into a persisted text format.
///
/// Every frame is encoded at the moment it is handed over, so later
/// mutations of the grid never leak into already-handled frames.
pub trait FrameSerializer {
    /// File suffix of the produced documents.
    fn extension(&self) -> &str;

    /// Encode one frame.
    ///
    /// Streaming serializers return the frame's own document for the caller
    /// to persist; batch serializers retain the frame and return `None`.
    fn handle_frame(&mut self, grid: &ColorGrid) -> Result<Option<EncodedFrame>>;

    /// Aggregate document of all retained frames, or `None` if this
    /// serializer does not retain frames.
    fn finalize(&mut self) -> Result<Option<String>>;

    /// Number of frames handled so far.
    fn frames_handled(&self) -> u64;
}

/// Retains every frame and emits a single `[frame][x][y][z]` document.
///
/// Memory grows with the number of frames, so the animator needs a bounded
/// stop condition (or the controller a frame cap).
#[derive(Debug, Clone, Default)]
pub struct BatchJsonSerializer {
    frames: Vec<PackedFrame>,
    pretty: bool,
}

impl BatchJsonSerializer {
    pub fn new(pretty: bool) -> Self {
        Self {
            frames: Vec::new(),
            pretty,
        }
    }

    /// Frames retained so far, in insertion order.
    pub fn frames(&self) -> &[PackedFrame] {
        &self.frames
    }

    /// The aggregate document for everything handled so far.
    pub fn get_parsed_results(&self) -> Result<String> {
        encode_batch(&self.frames, self.pretty)
    }
}

impl FrameSerializer for BatchJsonSerializer {
    fn extension(&self) -> &str {
        JSON_EXTENSION
    }

    fn handle_frame(&mut self, grid: &ColorGrid) -> Result<Option<EncodedFrame>> {
        self.frames.push(grid.to_packed()?);
        Ok(None)
    }

    fn finalize(&mut self) -> Result<Option<String>> {
        self.get_parsed_results().map(Some)
    }

    fn frames_handled(&self) -> u64 {
        self.frames.len() as u64
    }
}

/// Encodes each frame as a standalone `{"id": "Frame_<n>", "state": ...}`
/// document and keeps no history.
///
/// Persisting is the caller's job, one file per frame. That is not atomic:
/// if a later frame fails, files already written for earlier frames stay on
/// disk.
#[derive(Debug, Clone, Default)]
pub struct StreamingJsonSerializer {
    next_id: u64,
}

impl StreamingJsonSerializer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `grid` as the next frame document.
    pub fn parse(&mut self, grid: &ColorGrid) -> Result<String> {
        let doc = FrameDocument::new(self.next_id, grid.to_packed()?);
        let json = doc.to_json()?;
        self.next_id += 1;
        Ok(json)
    }
}

impl FrameSerializer for StreamingJsonSerializer {
    fn extension(&self) -> &str {
        JSON_EXTENSION
    }

    fn handle_frame(&mut self, grid: &ColorGrid) -> Result<Option<EncodedFrame>> {
        let index = self.next_id;
        let content = self.parse(grid)?;
        Ok(Some(EncodedFrame { index, content }))
    }

    fn finalize(&mut self) -> Result<Option<String>> {
        Ok(None)
    }

    fn frames_handled(&self) -> u64 {
        self.next_id
    }
}
