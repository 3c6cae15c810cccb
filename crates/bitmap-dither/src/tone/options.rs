//! Tone correction parameters.

/// Minimum effective levels span (`white_point - black_point`).
///
/// Keeps the levels remap and the rescaled threshold finite when the black
/// and white points meet or cross.
pub const LEVELS_MIN_SPAN: f32 = 1e-3;

/// Brightness, contrast, gamma, threshold offset and levels correction.
///
/// All values are in 8-bit sample units unless noted.
///
/// # Defaults
///
/// The default is the identity transform:
/// - Brightness: 0 (additive, slider range ±100)
/// - Contrast: 1.0 (ratio about pivot 128)
/// - Gamma: 1.0 (applied as `255 * (v/255)^(1/gamma)`)
/// - Threshold offset: 0 (additive, slider range ±128)
/// - Black point / white point: 0 / 255
///
/// # Example
///
/// ```
/// use bitmap_dither::ToneParameters;
///
/// let tone = ToneParameters::new()
///     .brightness(10.0)
///     .contrast(1.2)
///     .levels(16.0, 240.0);
///
/// assert_eq!(tone.black_point, 16.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneParameters {
    pub brightness: f32,

    /// Contrast ratio about 128. Negative values are read as 0.
    pub contrast: f32,

    /// Gamma exponent. Values `<= 0` (or non-finite) disable the gamma step.
    pub gamma: f32,

    pub threshold_offset: f32,

    pub black_point: f32,

    pub white_point: f32,
}

impl Default for ToneParameters {
    fn default() -> Self {
        Self {
            brightness: 0.0,
            contrast: 1.0,
            gamma: 1.0,
            threshold_offset: 0.0,
            black_point: 0.0,
            white_point: 255.0,
        }
    }
}

impl ToneParameters {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn brightness(mut self, value: f32) -> Self {
        self.brightness = value;
        self
    }

    #[inline]
    pub fn contrast(mut self, ratio: f32) -> Self {
        self.contrast = ratio;
        self
    }

    #[inline]
    pub fn gamma(mut self, gamma: f32) -> Self {
        self.gamma = gamma;
        self
    }

    #[inline]
    pub fn threshold_offset(mut self, offset: f32) -> Self {
        self.threshold_offset = offset;
        self
    }

    /// Set both levels bounds.
    #[inline]
    pub fn levels(mut self, black_point: f32, white_point: f32) -> Self {
        self.black_point = black_point;
        self.white_point = white_point;
        self
    }

    #[inline]
    pub fn black_point(mut self, value: f32) -> Self {
        self.black_point = value;
        self
    }

    #[inline]
    pub fn white_point(mut self, value: f32) -> Self {
        self.white_point = value;
        self
    }

    /// `white_point - black_point`, never below [`LEVELS_MIN_SPAN`].
    #[inline]
    pub fn levels_span(&self) -> f32 {
        // f32::max ignores a NaN operand, so a NaN span also lands on the floor
        (self.white_point - self.black_point).max(LEVELS_MIN_SPAN)
    }

    /// Contrast ratio as applied (never negative).
    #[inline]
    pub fn effective_contrast(&self) -> f32 {
        self.contrast.max(0.0)
    }

    /// Reciprocal gamma exponent, or `None` when gamma is a no-op.
    #[inline]
    pub fn gamma_exponent(&self) -> Option<f32> {
        if self.gamma.is_finite() && self.gamma > 0.0 {
            Some(1.0 / self.gamma)
        } else {
            None
        }
    }
}
