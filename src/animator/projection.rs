//! Image-driven animators.

use std::path::Path;

use image::RgbaImage;

use crate::cube::{ColorGrid, Dimensions, Rgb};
use crate::error::{GeneratorError, Result};
use crate::schema::{Axis, ConfigError};

use super::{Animator, ImageSource, ReferenceImage};

/// Number of updates a rotation runs for (four full turns).
pub const ROTATION_UPDATES: u32 = 16;

/// Which plane shows the image and in which direction it is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationMode {
    ZForward,
    XReversed,
    ZReversed,
    XForward,
}

impl RotationMode {
    const CYCLE: [RotationMode; 4] = [
        RotationMode::ZForward,
        RotationMode::XReversed,
        RotationMode::ZReversed,
        RotationMode::XForward,
    ];

    /// Mode shown after the `update`-th update (1-based).
    pub fn for_update(update: u32) -> Self {
        Self::CYCLE[(update.saturating_sub(1) % 4) as usize]
    }

    /// Axis perpendicular to the displayed plane.
    pub fn axis(self) -> Axis {
        match self {
            RotationMode::ZForward | RotationMode::ZReversed => Axis::Z,
            RotationMode::XForward | RotationMode::XReversed => Axis::X,
        }
    }

    pub fn is_reversed(self) -> bool {
        matches!(self, RotationMode::XReversed | RotationMode::ZReversed)
    }
}

fn not_set_up(name: &'static str) -> GeneratorError {
    GeneratorError::InvalidState {
        operation: name,
        state: "not set up",
    }
}

/// A reference image shown on the middle plane of the cube, alternating
/// between the Z and X planes (and flipping) to fake a rotation around Y.
///
/// Every voxel off the active plane is black.
#[derive(Debug, Clone)]
pub struct RotatingImage {
    source: ImageSource,
    image: Option<ReferenceImage>,
    plane: usize,
    updates: u32,
}

impl RotatingImage {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::from_source(ImageSource::Path(path.as_ref().to_path_buf()))
    }

    pub fn with_image(image: RgbaImage) -> Self {
        Self::from_source(ImageSource::Memory(image))
    }

    fn from_source(source: ImageSource) -> Self {
        Self {
            source,
            image: None,
            plane: 0,
            updates: 0,
        }
    }

    /// Mode of the current frame, if any update has happened.
    pub fn mode(&self) -> Option<RotationMode> {
        (self.updates > 0).then(|| RotationMode::for_update(self.updates))
    }

    /// Index of the displayed plane.
    pub fn plane(&self) -> usize {
        self.plane
    }
}

impl Animator for RotatingImage {
    fn name(&self) -> &str {
        "rotating-image"
    }

    fn setup(&mut self, dimensions: Dimensions) -> Result<()> {
        if dimensions.width != dimensions.depth {
            return Err(ConfigError::UnsupportedAxis {
                width: dimensions.width,
                depth: dimensions.depth,
            }
            .into());
        }
        self.image = Some(self.source.load(dimensions.width, dimensions.height)?);
        self.plane = dimensions.width / 2;
        Ok(())
    }

    fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
        let image = self.image.as_ref().ok_or_else(|| not_set_up("update"))?;
        self.updates += 1;
        let mode = RotationMode::for_update(self.updates);

        grid.clear();
        let span = image.width();
        for y in 0..grid.height() {
            for u in 0..span {
                let src = if mode.is_reversed() { span - 1 - u } else { u };
                let color = image.pixel(src, y);
                match mode.axis() {
                    Axis::Z => grid.set(u, y, self.plane, color)?,
                    _ => grid.set(self.plane, y, u, color)?,
                }
            }
        }
        Ok(())
    }

    fn stop(&self, _grid: &ColorGrid, _frame: u64) -> bool {
        self.updates >= ROTATION_UPDATES
    }
}

/// A reference image extruded through the whole cube along one axis.
///
/// Shows the start frame and one more, then stops.
#[derive(Debug, Clone)]
pub struct StaticProjection {
    source: ImageSource,
    axis: Axis,
    image: Option<ReferenceImage>,
}

impl StaticProjection {
    pub fn new<P: AsRef<Path>>(path: P, axis: Axis) -> Self {
        Self::from_source(ImageSource::Path(path.as_ref().to_path_buf()), axis)
    }

    pub fn with_image(image: RgbaImage, axis: Axis) -> Self {
        Self::from_source(ImageSource::Memory(image), axis)
    }

    fn from_source(source: ImageSource, axis: Axis) -> Self {
        Self {
            source,
            axis,
            image: None,
        }
    }

    /// Image plane size (columns, rows) for an extrusion along `axis`.
    fn plane_size(dimensions: Dimensions, axis: Axis) -> (usize, usize) {
        match axis {
            Axis::X => (dimensions.depth, dimensions.height),
            Axis::Y => (dimensions.width, dimensions.depth),
            Axis::Z => (dimensions.width, dimensions.height),
        }
    }
}

impl Animator for StaticProjection {
    fn name(&self) -> &str {
        "static-projection"
    }

    fn setup(&mut self, dimensions: Dimensions) -> Result<()> {
        let (columns, rows) = Self::plane_size(dimensions, self.axis);
        self.image = Some(self.source.load(columns, rows)?);
        Ok(())
    }

    fn update(&mut self, grid: &mut ColorGrid) -> Result<()> {
        let image = self.image.as_ref().ok_or_else(|| not_set_up("update"))?;
        for z in 0..grid.depth() {
            for y in 0..grid.height() {
                for x in 0..grid.width() {
                    let color: Rgb = match self.axis {
                        Axis::X => image.pixel(z, y),
                        Axis::Y => image.pixel(x, z),
                        Axis::Z => image.pixel(x, y),
                    };
                    grid.set(x, y, z, color)?;
                }
            }
        }
        Ok(())
    }

    fn stop(&self, _grid: &ColorGrid, frame: u64) -> bool {
        frame > 0
    }
}
