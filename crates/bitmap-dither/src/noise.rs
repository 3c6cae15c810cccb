//! Glitch noise source.
//!
//! Glitch noise is uniform jitter in `[-intensity, +intensity]`, drawn once
//! per sample by the Tone Mapper and once per sample by the Quantizer. An
//! inactive source never touches its RNG, so a zero-intensity run is
//! byte-for-byte reproducible.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Upper bound of the glitch intensity slider.
pub const MAX_GLITCH: f32 = 100.0;

/// Seedable uniform noise with a fixed magnitude.
///
/// # Example
///
/// ```
/// use bitmap_dither::Glitch;
///
/// let mut off = Glitch::disabled();
/// assert_eq!(off.sample(), 0.0);
///
/// let mut a = Glitch::new(10.0, Some(7));
/// let mut b = Glitch::new(10.0, Some(7));
/// assert_eq!(a.sample(), b.sample());
/// ```
#[derive(Debug, Clone)]
pub struct Glitch {
    intensity: f32,
    rng: StdRng,
}

impl Glitch {
    /// Create a noise source.
    ///
    /// Negative or non-finite intensities disable the source; values above
    /// [`MAX_GLITCH`] are capped. Without a seed the RNG is seeded from OS
    /// entropy.
    pub fn new(intensity: f32, seed: Option<u64>) -> Self {
        let intensity = if intensity.is_finite() {
            intensity.clamp(0.0, MAX_GLITCH)
        } else {
            0.0
        };
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { intensity, rng }
    }

    /// A source that always yields zero.
    pub fn disabled() -> Self {
        Self::new(0.0, Some(0))
    }

    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.intensity > 0.0
    }

    /// Draw `uniform(-intensity, +intensity)`, or `0.0` when inactive.
    #[inline]
    pub fn sample(&mut self) -> f32 {
        if !self.is_active() {
            return 0.0;
        }
        self.rng.gen_range(-self.intensity..=self.intensity)
    }
}
