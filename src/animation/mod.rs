//! Frame recording, serialization and playback for LED cube animations.
//!
//! A [`CubeController`] runs an [`Animator`](crate::animator::Animator)
//! and hands every frame to a [`FrameSerializer`]; the result is committed
//! by an [`ArtifactWriter`].
//!
//! # File Format
//!
//! Colors are packed as `0xRRGGBB` integers (channels scaled by 255 and
//! truncated) and laid out as nested `[x][y][z]` arrays.
//!
//! ```text
//! Batch (<name>.json):
//!   [frame][x][y][z]u32
//!
//! Streaming (<name>_frame_<n>.json, one per frame):
//!   { "id": "Frame_<n>", "state": [x][y][z]u32 }
//! ```

mod controller;
mod format;
mod player;
mod serializer;
mod writer;

pub use controller::{
    ControllerConfig, ControllerState, CubeController, RunStats, generate_frames,
};
pub use format::{
    FRAME_ID_PREFIX, FrameDocument, JSON_EXTENSION, PackedFrame, artifact_file_name,
    decode_batch, encode_batch, frame_file_name,
};
pub use player::AnimationPlayer;
pub use serializer::{BatchJsonSerializer, EncodedFrame, FrameSerializer, StreamingJsonSerializer};
pub use writer::{ArtifactWriter, FileWriter, MemoryWriter};
