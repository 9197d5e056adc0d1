//! Dense 3D grid of voxel colors.

use std::fmt;

use super::Rgb;
use crate::error::{GeneratorError, Result};
use crate::schema::{Axis, ConfigError};

/// Cube dimensions in voxels. All three are non-zero once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    /// X extent.
    pub width: usize,
    /// Y extent.
    pub height: usize,
    /// Z extent.
    pub depth: usize,
}

impl Dimensions {
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Cube with equal sides.
    pub const fn cube(width: usize) -> Self {
        Self::new(width, width, width)
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 || self.depth == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        Ok(())
    }

    /// Total number of voxels.
    #[inline]
    pub fn voxel_count(&self) -> usize {
        self.width * self.height * self.depth
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Mutable color state of the whole cube.
///
/// Dimensions are fixed at creation. Colors are stored as a flat array with
/// indexing `z * height * width + y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorGrid {
    dimensions: Dimensions,
    voxels: Vec<Rgb>,
}

impl ColorGrid {
    /// Create a grid with every voxel black.
    pub fn new(dimensions: Dimensions) -> std::result::Result<Self, ConfigError> {
        dimensions.validate()?;
        Ok(Self {
            dimensions,
            voxels: vec![Rgb::BLACK; dimensions.voxel_count()],
        })
    }

    #[inline]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.dimensions.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.dimensions.height
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.dimensions.depth
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        z * self.dimensions.height * self.dimensions.width + y * self.dimensions.width + x
    }

    fn checked_idx(&self, x: usize, y: usize, z: usize) -> Result<usize> {
        if !self.dimensions.contains(x, y, z) {
            return Err(GeneratorError::OutOfBounds {
                x,
                y,
                z,
                dimensions: self.dimensions,
            });
        }
        Ok(self.idx(x, y, z))
    }

    /// Color at (x, y, z).
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<Rgb> {
        let i = self.checked_idx(x, y, z)?;
        Ok(self.voxels[i])
    }

    /// Set the color at (x, y, z).
    pub fn set(&mut self, x: usize, y: usize, z: usize, color: Rgb) -> Result<()> {
        let i = self.checked_idx(x, y, z)?;
        self.voxels[i] = color;
        Ok(())
    }

    /// Set every voxel to `color`.
    pub fn fill(&mut self, color: Rgb) {
        self.voxels.fill(color);
    }

    /// Set every voxel to black.
    pub fn clear(&mut self) {
        self.fill(Rgb::BLACK);
    }

    /// Set every voxel of the plane `axis == index` to `color`.
    pub fn fill_plane(&mut self, axis: Axis, index: usize, color: Rgb) -> Result<()> {
        let (w, h, d) = (self.width(), self.height(), self.depth());
        match axis {
            Axis::X => {
                for z in 0..d {
                    for y in 0..h {
                        self.set(index, y, z, color)?;
                    }
                }
            }
            Axis::Y => {
                for z in 0..d {
                    for x in 0..w {
                        self.set(x, index, z, color)?;
                    }
                }
            }
            Axis::Z => {
                for y in 0..h {
                    for x in 0..w {
                        self.set(x, y, index, color)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Iterate over `((x, y, z), color)` in storage order.
    pub fn iter(&self) -> impl Iterator<Item = ((usize, usize, usize), Rgb)> + '_ {
        let (w, h) = (self.width(), self.height());
        self.voxels
            .iter()
            .enumerate()
            .map(move |(i, &c)| ((i % w, (i / w) % h, i / (w * h)), c))
    }

    /// Number of voxels that are not black.
    pub fn lit_count(&self) -> usize {
        self.voxels.iter().filter(|c| !c.is_black()).count()
    }

    /// Encode as nested `[x][y][z]` packed colors.
    pub fn to_packed(&self) -> Result<Vec<Vec<Vec<u32>>>> {
        let mut out = Vec::with_capacity(self.width());
        for x in 0..self.width() {
            let mut plane = Vec::with_capacity(self.height());
            for y in 0..self.height() {
                let mut column = Vec::with_capacity(self.depth());
                for z in 0..self.depth() {
                    column.push(self.voxels[self.idx(x, y, z)].to_packed()?);
                }
                plane.push(column);
            }
            out.push(plane);
        }
        Ok(out)
    }

    /// Decode nested `[x][y][z]` packed colors.
    ///
    /// The input must be rectangular and non-empty in every dimension.
    pub fn from_packed(state: &[Vec<Vec<u32>>]) -> Result<Self> {
        let width = state.len();
        let height = state.first().map_or(0, Vec::len);
        let depth = state
            .first()
            .and_then(|plane| plane.first())
            .map_or(0, Vec::len);

        let mut grid = ColorGrid::new(Dimensions::new(width, height, depth))?;
        for (x, plane) in state.iter().enumerate() {
            if plane.len() != height {
                return Err(GeneratorError::Playback(format!(
                    "plane x={} has {} rows, expected {}",
                    x,
                    plane.len(),
                    height
                )));
            }
            for (y, column) in plane.iter().enumerate() {
                if column.len() != depth {
                    return Err(GeneratorError::Playback(format!(
                        "column ({}, {}) has {} voxels, expected {}",
                        x,
                        y,
                        column.len(),
                        depth
                    )));
                }
                for (z, &color) in column.iter().enumerate() {
                    let i = grid.idx(x, y, z);
                    grid.voxels[i] = Rgb::from_packed(color);
                }
            }
        }
        Ok(grid)
    }
}
