//! Quantizer options.

use super::DitherMethod;

/// Configuration for the Quantizer.
///
/// # Defaults
///
/// - Method: [`DitherMethod::FloydSteinberg`]
/// - Dither strength: 1.0 (the canonical algorithm)
/// - Glitch: 0 (no noise)
///
/// # Example
///
/// ```
/// use bitmap_dither::{DitherMethod, QuantizeOptions};
///
/// let options = QuantizeOptions::new()
///     .method(DitherMethod::Burkes)
///     .dither_strength(0.5);
/// assert_eq!(options.effective_strength(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantizeOptions {
    pub method: DitherMethod,

    /// Multiplier on carried error.
    ///
    /// `0` degenerates to flat thresholding, `1` is the canonical kernel,
    /// values above 1 over-amplify. Ignored by [`DitherMethod::Ordered`].
    pub dither_strength: f32,

    /// Glitch intensity, `0..=100`.
    pub glitch: f32,
}

impl Default for QuantizeOptions {
    fn default() -> Self {
        Self {
            method: DitherMethod::default(),
            dither_strength: 1.0,
            glitch: 0.0,
        }
    }
}

impl QuantizeOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.method = method;
        self
    }

    #[inline]
    pub fn dither_strength(mut self, strength: f32) -> Self {
        self.dither_strength = strength;
        self
    }

    #[inline]
    pub fn glitch(mut self, intensity: f32) -> Self {
        self.glitch = intensity;
        self
    }

    /// Strength as applied: negative or non-finite values read as 0.
    #[inline]
    pub fn effective_strength(&self) -> f32 {
        if self.dither_strength.is_finite() {
            self.dither_strength.max(0.0)
        } else {
            0.0
        }
    }
}
