//! Animators that sweep a lit column along the X axis.
//!
//! Both variants light one new column per update and stop once the frame
//! showing the last column has been recorded, so a cube of width `w`
//! produces exactly `w` frames.

use crate::cube::{ColorGrid, Rgb};
use crate::error::Result;
use crate::schema::Axis;

use super::Animator;

/// Red intensity for the leading column and its two trailing columns.
const TRAIL: [f32; 3] = [1.0, 0.5, 0.25];

#[inline]
fn sweep_finished(grid: &ColorGrid, frame: u64) -> bool {
    frame.saturating_add(1) >= grid.width() as u64
}

/// A single solid-color plane moving along X; everything else is black.
#[derive(Debug, Clone)]
pub struct PlaneSweep {
    color: Rgb,
    current_x: usize,
}

impl PlaneSweep {
    /// White plane sweep.
    pub fn new() -> Self {
        Self::with_color(Rgb::WHITE)
    }

    pub fn with_color(color: Rgb) -> Self {
        Self {
            color,
            current_x: 0,
        }
    }
}

impl Default for PlaneSweep {
    fn default() -> Self {
        Self::new()
    }
}

impl Animator for PlaneSweep {
    fn name(&self) -> &str {
        "plane-sweep"
    }

    fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
        grid.clear();
        if self.current_x < grid.width() {
            grid.fill_plane(Axis::X, self.current_x, self.color)?;
        }
        self.current_x += 1;
        Ok(())
    }

    fn stop(&self, grid: &ColorGrid, frame: u64) -> bool {
        sweep_finished(grid, frame)
    }
}

/// A red column moving along X with a fading trail: the column behind the
/// leader is tinted green, the one behind that blue.
#[derive(Debug, Clone, Default)]
pub struct RgbSweep {
    current_x: usize,
}

impl RgbSweep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Color of column `x` while the leader is at `lead`.
    pub fn column_color(lead: usize, x: usize) -> Rgb {
        if x > lead {
            return Rgb::BLACK;
        }
        match lead - x {
            0 => Rgb::new(TRAIL[0], 0.0, 0.0),
            1 => Rgb::new(TRAIL[1], 1.0, 0.0),
            2 => Rgb::new(TRAIL[2], 0.0, 1.0),
            _ => Rgb::BLACK,
        }
    }
}

impl Animator for RgbSweep {
    fn name(&self) -> &str {
        "rgb-sweep"
    }

    fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
        for x in 0..grid.width() {
            grid.fill_plane(Axis::X, x, Self::column_color(self.current_x, x))?;
        }
        self.current_x += 1;
        Ok(())
    }

    fn stop(&self, grid: &ColorGrid, frame: u64) -> bool {
        sweep_finished(grid, frame)
    }
}
