//! Reference images for image-driven animators.

use std::path::{Path, PathBuf};

use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::cube::Rgb;
use crate::error::{GeneratorError, Result};

/// Where an animator gets its reference image from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// Loaded from disk during setup.
    Path(PathBuf),
    /// Already decoded.
    Memory(RgbaImage),
}

impl ImageSource {
    /// Decode (if needed) and resample to `width` x `height`.
    pub fn load(&self, width: usize, height: usize) -> Result<ReferenceImage> {
        match self {
            ImageSource::Path(path) => ReferenceImage::open(path, width, height),
            ImageSource::Memory(img) => Ok(ReferenceImage::from_image(img, width, height)),
        }
    }
}

/// A reference image flattened into normalized colors.
///
/// Pixels are taken in row-major order and then reversed, so index 0 is the
/// last pixel of the bottom row. Fully transparent pixels become black.
#[derive(Debug, Clone)]
pub struct ReferenceImage {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl ReferenceImage {
    /// Load an image file and resample it to `width` x `height`.
    pub fn open<P: AsRef<Path>>(path: P, width: usize, height: usize) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| GeneratorError::MissingResource {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "Loaded reference image {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Ok(Self::from_image(&img.to_rgba8(), width, height))
    }

    /// Flatten a decoded image, resampling (nearest neighbour) when its size
    /// differs from `width` x `height`.
    pub fn from_image(img: &RgbaImage, width: usize, height: usize) -> Self {
        let (w, h) = (width as u32, height as u32);
        let resized;
        let source = if img.dimensions() == (w, h) {
            img
        } else {
            resized = imageops::resize(img, w, h, FilterType::Nearest);
            &resized
        };

        let mut pixels: Vec<Rgb> = source
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                if a == 0 {
                    Rgb::BLACK
                } else {
                    Rgb::from_bytes(r, g, b)
                }
            })
            .collect();
        pixels.reverse();

        Self {
            width,
            height,
            pixels,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Color at flattened position `u + v * width`. Out-of-range positions
    /// read as black.
    #[inline]
    pub fn pixel(&self, u: usize, v: usize) -> Rgb {
        if u >= self.width || v >= self.height {
            return Rgb::BLACK;
        }
        self.pixels[u + v * self.width]
    }
}
