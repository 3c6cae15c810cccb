//! Kernel-driven error diffusion over a single channel field.

use crate::noise::Glitch;
use crate::raster::ChannelField;

use super::{read_sample, Kernel};

/// Core error diffusion loop shared by every kernel.
///
/// Visits samples in raster order. For each one:
///
/// 1. Read the sample, clamped to `[0, 255]`
/// 2. `bit = value >= threshold + jitter` (one glitch draw per sample)
/// 3. Carry `(value - quantized) * strength`, dropped if non-finite
/// 4. Add `carry * weight / divisor` to every in-bounds kernel neighbor
///
/// Out-of-bounds neighbors are skipped and their share is lost. The field
/// keeps the error-adjusted input of each visited sample; quantized values
/// are only returned, as one bit (0 or 1) per sample.
pub fn diffuse_with_kernel(
    field: &mut ChannelField,
    kernel: &Kernel,
    threshold: f32,
    strength: f32,
    glitch: &mut Glitch,
) -> Vec<u8> {
    let (width, height) = (field.width(), field.height());
    let divisor = kernel.divisor as f32;
    let mut bits = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let value = read_sample(field.get(x, y));
            let bit = value >= threshold + glitch.sample();
            bits.push(u8::from(bit));

            let quantized = if bit { 255.0 } else { 0.0 };
            let mut carry = (value - quantized) * strength;
            if !carry.is_finite() {
                carry = 0.0;
            }
            if carry == 0.0 {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let nx = x as isize + dx as isize;
                let ny = y as isize + dy as isize;
                if nx < 0 || nx >= width as isize || ny >= height as isize {
                    continue;
                }
                field.add(nx as usize, ny as usize, carry * weight as f32 / divisor);
            }
        }
    }
    bits
}
