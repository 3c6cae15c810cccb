//! Ordered dithering with a 4x4 Bayer matrix.
//!
//! No error is carried. Each sample is compared on its own against the
//! tiled matrix cell, so changing one input sample changes at most one bit.

use crate::noise::Glitch;
use crate::raster::ChannelField;

use super::read_sample;

/// Bayer 4x4 threshold ranks, indexed `[y & 3][x & 3]`.
pub const BAYER_4X4: [[u8; 4]; 4] = [[0, 8, 2, 10], [12, 4, 14, 6], [3, 11, 1, 9], [15, 7, 13, 5]];

/// Normalized comparison point `(rank + 0.5) / 16` for cell `(x, y)`.
#[inline]
pub fn bayer_threshold(x: usize, y: usize) -> f32 {
    (BAYER_4X4[y & 3][x & 3] as f32 + 0.5) / 16.0
}

/// Quantize a field with the tiled Bayer matrix.
///
/// `bit = v / 255 >= bayer_threshold(x, y) + jitter / 200`, where `jitter` is
/// one glitch draw per sample. The field is only read.
pub fn ordered_bayer(field: &ChannelField, glitch: &mut Glitch) -> Vec<u8> {
    let (width, height) = (field.width(), field.height());
    let mut bits = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            let normalized = read_sample(field.get(x, y)) / 255.0;
            let point = bayer_threshold(x, y) + glitch.sample() / 200.0;
            bits.push(u8::from(normalized >= point));
        }
    }
    bits
}
