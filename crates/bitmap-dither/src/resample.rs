//! Resampler: nearest-neighbor reduction to the working resolution.
//!
//! Only downsampling lives here. Display and export upscaling is the caller's
//! job and must replicate blocks without smoothing.

use crate::color::{extract, Channel};
use crate::raster::{ChannelField, PixelBuffer};

/// Working-resolution fraction of the source dimensions.
///
/// # Example
///
/// ```
/// use bitmap_dither::{working_dimensions, ScaleParameters};
///
/// let scale = ScaleParameters::new(50.0);
/// assert_eq!(working_dimensions(640, 480, &scale), (320, 240));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleParameters {
    /// Percentage of the source size, nominally in `(0, 100]`.
    pub scale_percent: f32,
}

impl Default for ScaleParameters {
    fn default() -> Self {
        Self {
            scale_percent: 100.0,
        }
    }
}

impl ScaleParameters {
    #[inline]
    pub fn new(scale_percent: f32) -> Self {
        Self { scale_percent }
    }
}

/// Largest accepted scale. The working raster never exceeds the source;
/// enlarging it is left to the display/export upscale.
pub const MAX_SCALE_PERCENT: f32 = 100.0;

/// `max(1, floor(dim * min(scale_percent, MAX_SCALE_PERCENT) / 100))` for one
/// axis.
fn scaled_axis(dim: usize, scale_percent: f32) -> usize {
    if scale_percent.is_nan() {
        return 1;
    }
    let pct = scale_percent.min(MAX_SCALE_PERCENT) as f64;
    let scaled = (dim as f64 * pct / 100.0).floor();
    if scaled >= 1.0 {
        (scaled as usize).min(dim.max(1))
    } else {
        1
    }
}

/// Working width and height for a source of `src_w x src_h`.
///
/// Never returns a zero dimension and never exceeds the source. A zero,
/// negative or NaN scale floors to `1x1`; anything above
/// [`MAX_SCALE_PERCENT`], infinity included, is capped to the source size.
pub fn working_dimensions(src_w: usize, src_h: usize, scale: &ScaleParameters) -> (usize, usize) {
    (
        scaled_axis(src_w, scale.scale_percent),
        scaled_axis(src_h, scale.scale_percent),
    )
}

/// Source index sampled for destination index `d` on one axis.
#[inline]
fn source_index(d: usize, src: usize, dst: usize) -> usize {
    // floor(d / dst * src) in exact integer arithmetic
    ((d as u128 * src as u128) / dst as u128).min(src.saturating_sub(1) as u128) as usize
}

/// Nearest-neighbor resample of `field` to `dst_w x dst_h`.
///
/// Destination cell `(x, y)` takes source cell
/// `(floor(x / dst_w * src_w), floor(y / dst_h * src_h))`. There is no
/// interpolation or averaging. Zero destination dimensions are raised to 1.
pub fn downsample(field: &ChannelField, dst_w: usize, dst_h: usize) -> ChannelField {
    let dst_w = dst_w.max(1);
    let dst_h = dst_h.max(1);
    let src_w = field.width();
    let src_h = field.height();

    let columns: Vec<usize> = (0..dst_w).map(|x| source_index(x, src_w, dst_w)).collect();
    let mut samples = Vec::with_capacity(dst_w * dst_h);
    for y in 0..dst_h {
        let sy = source_index(y, src_h, dst_h);
        samples.extend(columns.iter().map(|&sx| field.get(sx, sy)));
    }
    ChannelField::new(dst_w, dst_h, samples)
}

/// Source alpha at the working resolution, with the same cell mapping as
/// [`downsample`].
pub fn downsample_alpha(source: &PixelBuffer, dst_w: usize, dst_h: usize) -> ChannelField {
    downsample(&extract(source, Channel::Alpha), dst_w, dst_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_scale_is_identity() {
        let scale = ScaleParameters::default();
        assert_eq!(working_dimensions(37, 11, &scale), (37, 11));

        let field = ChannelField::new(3, 2, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(downsample(&field, 3, 2), field);
    }

    #[test]
    fn test_working_dimensions_floor() {
        let scale = ScaleParameters::new(33.0);
        // 100 * 0.33 = 33, 10 * 0.33 = 3.3 -> 3
        assert_eq!(working_dimensions(100, 10, &scale), (33, 3));
    }

    #[test]
    fn test_working_dimensions_never_zero() {
        for pct in [1.0, 0.01, 0.0, -50.0, f32::NAN, f32::NEG_INFINITY] {
            let (w, h) = working_dimensions(3, 2, &ScaleParameters::new(pct));
            assert!(w >= 1 && h >= 1, "scale {pct} produced {w}x{h}");
        }
        assert_eq!(working_dimensions(3, 2, &ScaleParameters::new(1.0)), (1, 1));
        assert_eq!(working_dimensions(30, 20, &ScaleParameters::new(f32::NAN)), (1, 1));
    }

    #[test]
    fn test_scale_above_full_is_capped_to_source() {
        for pct in [200.0, 1.0e12, f32::MAX, f32::INFINITY] {
            let (w, h) = working_dimensions(4, 3, &ScaleParameters::new(pct));
            assert_eq!((w, h), (4, 3), "scale {pct} must not grow the working raster");
        }
    }

    #[test]
    fn test_downsample_picks_floor_cells() {
        // 4x1 -> 2x1 samples columns 0 and 2
        let field = ChannelField::new(4, 1, vec![10.0, 20.0, 30.0, 40.0]);
        let small = downsample(&field, 2, 1);
        assert_eq!(small.samples(), &[10.0, 30.0]);
    }

    #[test]
    fn test_downsample_to_single_cell() {
        let field = ChannelField::new(2, 2, vec![9.0, 1.0, 1.0, 1.0]);
        let small = downsample(&field, 1, 1);
        assert_eq!(small.samples(), &[9.0]);
    }

    #[test]
    fn test_downsample_zero_target_raised_to_one() {
        let field = ChannelField::filled(5, 5, 7.0);
        let small = downsample(&field, 0, 0);
        assert_eq!((small.width(), small.height()), (1, 1));
    }

    #[test]
    fn test_upsampling_replicates() {
        let field = ChannelField::new(2, 1, vec![0.0, 255.0]);
        let big = downsample(&field, 4, 1);
        assert_eq!(big.samples(), &[0.0, 0.0, 255.0, 255.0]);
    }

    #[test]
    fn test_downsample_alpha_follows_same_mapping() {
        let source =
            PixelBuffer::from_fn(4, 1, |x, _| [0, 0, 0, (x as u8) * 50]).unwrap();
        let alpha = downsample_alpha(&source, 2, 1);
        assert_eq!(alpha.samples(), &[0.0, 100.0]);
    }
}
