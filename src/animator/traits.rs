//! The animation strategy interface.

use crate::cube::{ColorGrid, Dimensions};
use crate::error::Result;

/// A pluggable policy that evolves the cube frame by frame and decides when
/// the sequence ends.
///
/// The controller owns the grid; animators only see it for the duration of
/// a call and keep their own counters between calls.
///
/// ```ignore
/// animator.setup(grid.dimensions())?;
/// animator.start(&mut grid)?;
/// let mut frame = 0;
/// while !animator.stop(&grid, frame) {
///     animator.update(&mut grid)?;
///     frame += 1;
/// }
/// ```
pub trait Animator {
    /// Short name used in log output.
    fn name(&self) -> &str;

    /// One-time initialization for a cube of the given size.
    ///
    /// Resource loading (reference images) happens here so that failures
    /// surface before any frame is generated.
    fn setup(&mut self, _dimensions: Dimensions) -> Result<()> {
        Ok(())
    }

    /// Produce the first frame. Defaults to a regular update.
    fn start(&mut self, grid: &mut ColorGrid) -> Result<()> {
        self.update(grid)
    }

    /// Produce the next frame in place.
    fn update(&mut self, grid: &mut ColorGrid) -> Result<()>;

    /// Whether the sequence ends after `frame` (the index of the frame just
    /// recorded). Must not change state; the default never stops.
    fn stop(&self, _grid: &ColorGrid, _frame: u64) -> bool {
        false
    }
}
