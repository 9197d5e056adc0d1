//! Animation player for reading back batch artifacts.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::format::decode_batch;
use crate::cube::{ColorGrid, Dimensions};
use crate::error::{GeneratorError, Result};

/// Plays back a batch document (`[frame][x][y][z]` packed colors).
///
/// Usage:
/// ```ignore
/// let mut player = AnimationPlayer::open("animation.json")?;
/// println!("Animation has {} frames", player.frame_count());
///
/// // Loop forever, like the cube does
/// loop {
///     let grid = player.next_frame();
///     // Push grid to hardware...
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    frames: Vec<ColorGrid>,
    dimensions: Dimensions,
    cursor: usize,
}

impl AnimationPlayer {
    /// Open a batch artifact.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| GeneratorError::ReadFailure {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Decode a batch document. Every frame must have the same dimensions.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let packed = decode_batch(reader)?;

        let mut frames = Vec::with_capacity(packed.len());
        for (index, state) in packed.iter().enumerate() {
            let grid = ColorGrid::from_packed(state)
                .map_err(|e| GeneratorError::Playback(format!("frame {}: {}", index, e)))?;
            frames.push(grid);
        }

        let dimensions = frames[0].dimensions();
        if let Some((index, grid)) = frames
            .iter()
            .enumerate()
            .find(|(_, g)| g.dimensions() != dimensions)
        {
            return Err(GeneratorError::Playback(format!(
                "frame {} is {}, expected {}",
                index,
                grid.dimensions(),
                dimensions
            )));
        }

        log::debug!("Loaded {} frames of {}", frames.len(), dimensions);
        Ok(Self {
            frames,
            dimensions,
            cursor: 0,
        })
    }

    /// Get total number of frames.
    pub fn frame_count(&self) -> u64 {
        self.frames.len() as u64
    }

    /// Get cube dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Read a specific frame by index.
    pub fn read_frame(&self, frame_index: u64) -> Result<&ColorGrid> {
        self.frames.get(frame_index as usize).ok_or_else(|| {
            GeneratorError::Playback(format!(
                "Frame index {} out of range (max {})",
                frame_index,
                self.frames.len() - 1
            ))
        })
    }

    /// Next frame in sequence, wrapping to the first after the last.
    pub fn next_frame(&mut self) -> &ColorGrid {
        let index = self.cursor;
        self.cursor = (self.cursor + 1) % self.frames.len();
        &self.frames[index]
    }

    /// Rewind to the first frame.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Iterate over all frames once.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &ColorGrid> {
        self.frames.iter()
    }
}
