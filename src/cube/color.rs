//! Normalized RGB colors and 24-bit packed color encoding.
//!
//! The grid always holds normalized channels in [0, 1]. Serializers convert
//! to 8-bit channels (`channel * 255`, truncated) and pack them as
//! `0xRRGGBB`.

use crate::error::{GeneratorError, Result};

/// Linear RGB color with channels normalized to [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from 8-bit channels.
    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
        )
    }

    /// Convert to 8-bit channels, rejecting values outside [0, 1].
    pub fn to_bytes(self) -> Result<(u8, u8, u8)> {
        Ok((
            channel_to_byte('r', self.r)?,
            channel_to_byte('g', self.g)?,
            channel_to_byte('b', self.b)?,
        ))
    }

    /// Encode as a packed `0xRRGGBB` value.
    pub fn to_packed(self) -> Result<u32> {
        let (r, g, b) = self.to_bytes()?;
        Ok(pack(r, g, b))
    }

    /// Decode a packed `0xRRGGBB` value.
    pub fn from_packed(color: u32) -> Self {
        let (r, g, b) = unpack(color);
        Self::from_bytes(r, g, b)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }
}

/// Scale a normalized channel to 8 bits (truncating).
///
/// NaN and values outside [0, 1] are an error rather than being clamped or
/// wrapped.
pub fn channel_to_byte(channel: char, value: f32) -> Result<u8> {
    if !(0.0..=1.0).contains(&value) {
        return Err(GeneratorError::UnsupportedColorRange { channel, value });
    }
    Ok((value * 255.0) as u8)
}

/// Pack 8-bit channels into `0xRRGGBB`.
#[inline]
pub fn pack(r: u8, g: u8, b: u8) -> u32 {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Split `0xRRGGBB` into its 8-bit channels. Bits above 24 are ignored.
#[inline]
pub fn unpack(color: u32) -> (u8, u8, u8) {
    (
        ((color >> 16) & 0xFF) as u8,
        ((color >> 8) & 0xFF) as u8,
        (color & 0xFF) as u8,
    )
}
