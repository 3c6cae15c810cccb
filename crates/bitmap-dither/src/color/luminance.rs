//! Color Reducer: RGBA source pixels to scalar channel fields.
//!
//! Reduction always runs at full source resolution, before any resampling.

use crate::raster::{ChannelField, PixelBuffer};

/// Rec. 601 luma weights.
pub const LUMA_R: f32 = 0.299;
pub const LUMA_G: f32 = 0.587;
pub const LUMA_B: f32 = 0.114;

/// A single channel of an RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Alpha,
}

impl Channel {
    #[inline]
    fn offset(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
            Channel::Alpha => 3,
        }
    }
}

/// Perceptual luminance of one pixel.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f32 {
    LUMA_R * r as f32 + LUMA_G * g as f32 + LUMA_B * b as f32
}

/// Reduce a source raster to one luminance sample per pixel.
///
/// Used by the Mono, Gray and Palette modes.
pub fn reduce(source: &PixelBuffer) -> ChannelField {
    let samples = source
        .pixels()
        .map(|[r, g, b, _]| luminance(r, g, b))
        .collect();
    ChannelField::new(source.width(), source.height(), samples)
}

/// Extract one channel without any mixing.
pub fn extract(source: &PixelBuffer, channel: Channel) -> ChannelField {
    let offset = channel.offset();
    let samples = source
        .as_bytes()
        .chunks_exact(4)
        .map(|p| p[offset] as f32)
        .collect();
    ChannelField::new(source.width(), source.height(), samples)
}

/// Split a source raster into independent R, G and B fields (RGB mode).
pub fn reduce_rgb(source: &PixelBuffer) -> [ChannelField; 3] {
    [
        extract(source, Channel::Red),
        extract(source, Channel::Green),
        extract(source, Channel::Blue),
    ]
}
