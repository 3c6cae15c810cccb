//! Tone Mapper: per-sample, position-independent correction.

use crate::noise::Glitch;
use crate::raster::ChannelField;

use super::ToneParameters;

/// Apply the deterministic part of the tone curve (steps 1-5) to one sample.
///
/// Order is fixed:
/// 1. `v + brightness`
/// 2. `(v - 128) * contrast + 128`
/// 3. `255 * (v/255)^(1/gamma)`, with a negative base read as 0
/// 4. `v + threshold_offset`
/// 5. `(v - black_point) * 255 / span`
///
/// The result is not clamped; see [`apply_tone`].
#[inline]
pub fn tone_sample(value: f32, params: &ToneParameters) -> f32 {
    let mut v = value + params.brightness;
    v = (v - 128.0) * params.effective_contrast() + 128.0;
    if let Some(exponent) = params.gamma_exponent() {
        // clamp-before-gamma: a negative base would make powf return NaN
        let base = (v / 255.0).max(0.0);
        v = 255.0 * base.powf(exponent);
    }
    v += params.threshold_offset;
    (v - params.black_point) * 255.0 / params.levels_span()
}

/// Tone-map a working field in place.
///
/// Runs [`tone_sample`], then adds one glitch draw per sample (a no-op when
/// the source is inactive), then clamps to `[0, 255]`.
///
/// # Example
///
/// ```
/// use bitmap_dither::{apply_tone, ChannelField, Glitch, ToneParameters};
///
/// let mut field = ChannelField::filled(2, 1, 100.0);
/// apply_tone(&mut field, &ToneParameters::new().brightness(200.0), &mut Glitch::disabled());
/// assert_eq!(field.samples(), &[255.0, 255.0]);
/// ```
pub fn apply_tone(field: &mut ChannelField, params: &ToneParameters, glitch: &mut Glitch) {
    for v in field.samples_mut() {
        let toned = tone_sample(*v, params) + glitch.sample();
        *v = toned.clamp(0.0, 255.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_identity_parameters_leave_values() {
        let params = ToneParameters::default();
        for v in [0.0, 1.0, 64.0, 128.0, 200.5, 255.0] {
            assert!(approx(tone_sample(v, &params), v), "v={v}");
        }
    }

    #[test]
    fn test_brightness_is_additive() {
        let params = ToneParameters::new().brightness(25.0);
        assert!(approx(tone_sample(100.0, &params), 125.0));
    }

    #[test]
    fn test_contrast_pivots_on_128() {
        let params = ToneParameters::new().contrast(2.0);
        assert!(approx(tone_sample(128.0, &params), 128.0));
        assert!(approx(tone_sample(138.0, &params), 148.0));
        assert!(approx(tone_sample(118.0, &params), 108.0));
    }

    #[test]
    fn test_zero_contrast_flattens_to_pivot() {
        let params = ToneParameters::new().contrast(0.0);
        assert!(approx(tone_sample(3.0, &params), 128.0));
        assert!(approx(tone_sample(250.0, &params), 128.0));
    }

    #[test]
    fn test_gamma_brightens_midtones() {
        let params = ToneParameters::new().gamma(2.0);
        // 255 * (0.25)^(1/2) = 127.5
        assert!(approx(tone_sample(63.75, &params), 127.5));
    }

    #[test]
    fn test_negative_base_is_clamped_before_gamma() {
        let params = ToneParameters::new().brightness(-100.0).gamma(2.2);
        let v = tone_sample(10.0, &params);
        assert!(v.is_finite());
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_non_positive_gamma_is_noop() {
        let params = ToneParameters::new().gamma(0.0);
        assert!(approx(tone_sample(77.0, &params), 77.0));
        let params = ToneParameters::new().gamma(-2.0);
        assert!(approx(tone_sample(77.0, &params), 77.0));
    }

    #[test]
    fn test_threshold_offset_after_gamma() {
        // Offset lands after the gamma step, so it is not raised to a power
        let params = ToneParameters::new().gamma(2.0).threshold_offset(10.0);
        assert!(approx(tone_sample(63.75, &params), 137.5));
    }

    #[test]
    fn test_levels_remap() {
        let params = ToneParameters::new().levels(50.0, 150.0);
        assert!(approx(tone_sample(50.0, &params), 0.0));
        assert!(approx(tone_sample(100.0, &params), 127.5));
        assert!(approx(tone_sample(150.0, &params), 255.0));
    }

    #[test]
    fn test_collapsed_levels_stay_finite() {
        let params = ToneParameters::new().levels(128.0, 128.0);
        let mut field = ChannelField::new(3, 1, vec![0.0, 128.0, 255.0]);
        apply_tone(&mut field, &params, &mut Glitch::disabled());
        assert_eq!(field.samples(), &[0.0, 0.0, 255.0]);
    }

    #[test]
    fn test_apply_tone_clamps() {
        let params = ToneParameters::new().contrast(4.0);
        let mut field = ChannelField::new(3, 1, vec![0.0, 128.0, 255.0]);
        apply_tone(&mut field, &params, &mut Glitch::disabled());
        assert_eq!(field.samples(), &[0.0, 128.0, 255.0]);
    }

    #[test]
    fn test_glitch_noise_is_bounded() {
        let params = ToneParameters::default();
        let mut field = ChannelField::filled(32, 32, 128.0);
        apply_tone(&mut field, &params, &mut Glitch::new(20.0, Some(3)));
        assert!(field.samples().iter().all(|&v| (108.0..=148.0).contains(&v)));
        assert!(
            field.samples().iter().any(|&v| v != 128.0),
            "Active glitch should perturb at least one sample"
        );
    }
}
