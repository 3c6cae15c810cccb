//! Quantizer: ordered and error diffusion dithering to one bit per sample.
//!
//! # Algorithms
//!
//! - **Ordered**: tiled 4x4 Bayer matrix, no error carry
//! - **Floyd-Steinberg**: classic 4-neighbor kernel, 100% propagation (default)
//! - **Atkinson**: 6 neighbors, 75% propagation
//! - **Sierra Lite**: 3 neighbors, 100% propagation
//! - **Burkes**: 7 neighbors over two rows, 100% propagation
//!
//! All of them scan in raster order (no serpentine) and are dispatched
//! through [`DitherMethod::quantize`].
//!
//! # Example
//!
//! ```
//! use bitmap_dither::dither::Threshold;
//! use bitmap_dither::{ChannelField, DitherMethod, Glitch, QuantizeOptions};
//!
//! let mut field = ChannelField::new(2, 1, vec![0.0, 255.0]);
//! let options = QuantizeOptions::new();
//! let bits = DitherMethod::FloydSteinberg.quantize(
//!     &mut field,
//!     Threshold::Fixed,
//!     &options,
//!     &mut Glitch::disabled(),
//! );
//! assert_eq!(bits, vec![0, 1]);
//! ```

mod diffusion;
mod kernel;
mod options;
mod ordered;

use std::fmt;
use std::str::FromStr;

use crate::api::ParseMethodError;
use crate::noise::Glitch;
use crate::raster::ChannelField;
use crate::tone::ToneParameters;

pub use diffusion::diffuse_with_kernel;
pub use kernel::{Kernel, ATKINSON, BURKES, FLOYD_STEINBERG, SIERRA_LITE};
pub use options::QuantizeOptions;
pub use ordered::{bayer_threshold, ordered_bayer, BAYER_4X4};

/// Base threshold of the error diffusion comparator.
///
/// RGB mode compares every channel against this value as-is.
pub const FIXED_THRESHOLD: f32 = 128.0;

/// Levels-rescaled error diffusion threshold for the luminance path.
///
/// `128 * 255 / max(LEVELS_MIN_SPAN, white_point - black_point)`. With the
/// default levels (0, 255) this is exactly 128.
///
/// [`LEVELS_MIN_SPAN`]: crate::LEVELS_MIN_SPAN
#[inline]
pub fn effective_threshold(tone: &ToneParameters) -> f32 {
    FIXED_THRESHOLD * 255.0 / tone.levels_span()
}

/// Threshold convention used by an error diffusion pass.
///
/// Mono, Gray and Palette rescale the base threshold by the levels span; RGB
/// uses the fixed base. Ordered dithering ignores both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Rescaled threshold, usually from [`effective_threshold`].
    Levels(f32),
    /// [`FIXED_THRESHOLD`].
    Fixed,
}

impl Threshold {
    /// Levels-rescaled threshold for `tone`.
    #[inline]
    pub fn levels(tone: &ToneParameters) -> Self {
        Threshold::Levels(effective_threshold(tone))
    }

    #[inline]
    pub fn value(self) -> f32 {
        match self {
            Threshold::Levels(t) => t,
            Threshold::Fixed => FIXED_THRESHOLD,
        }
    }
}

/// Sample as seen by a comparator: clamped to `[0, 255]`, NaN read as 0.
#[inline]
pub(crate) fn read_sample(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 255.0)
    }
}

/// Dithering method selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherMethod {
    /// Ordered 4x4 Bayer dithering.
    Ordered,

    /// Floyd-Steinberg error diffusion.
    #[default]
    FloydSteinberg,

    /// Atkinson error diffusion (75% propagation).
    Atkinson,

    /// Sierra Lite error diffusion.
    SierraLite,

    /// Burkes error diffusion.
    Burkes,
}

impl DitherMethod {
    /// Every method, in menu order.
    pub const ALL: [DitherMethod; 5] = [
        DitherMethod::Ordered,
        DitherMethod::FloydSteinberg,
        DitherMethod::Atkinson,
        DitherMethod::SierraLite,
        DitherMethod::Burkes,
    ];

    /// Diffusion kernel, or `None` for [`DitherMethod::Ordered`].
    pub fn kernel(self) -> Option<&'static Kernel> {
        match self {
            DitherMethod::Ordered => None,
            DitherMethod::FloydSteinberg => Some(&FLOYD_STEINBERG),
            DitherMethod::Atkinson => Some(&ATKINSON),
            DitherMethod::SierraLite => Some(&SIERRA_LITE),
            DitherMethod::Burkes => Some(&BURKES),
        }
    }

    /// Canonical lowercase name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            DitherMethod::Ordered => "ordered",
            DitherMethod::FloydSteinberg => "floyd-steinberg",
            DitherMethod::Atkinson => "atkinson",
            DitherMethod::SierraLite => "sierra-lite",
            DitherMethod::Burkes => "burkes",
        }
    }

    /// Quantize one channel field to bits (0 or 1, row-major).
    ///
    /// Error diffusion methods mutate `field` with the carried error and
    /// compare against `threshold`. Ordered ignores `threshold` and the dither
    /// strength, and leaves `field` untouched.
    pub fn quantize(
        self,
        field: &mut ChannelField,
        threshold: Threshold,
        options: &QuantizeOptions,
        glitch: &mut Glitch,
    ) -> Vec<u8> {
        match self.kernel() {
            None => ordered_bayer(field, glitch),
            Some(kernel) => diffuse_with_kernel(
                field,
                kernel,
                threshold.value(),
                options.effective_strength(),
                glitch,
            ),
        }
    }
}

impl fmt::Display for DitherMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherMethod {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        match key.as_str() {
            "ordered" | "bayer" => Ok(DitherMethod::Ordered),
            "floyd-steinberg" | "floyd" | "fs" => Ok(DitherMethod::FloydSteinberg),
            "atkinson" => Ok(DitherMethod::Atkinson),
            "sierra-lite" | "sierra" => Ok(DitherMethod::SierraLite),
            "burkes" => Ok(DitherMethod::Burkes),
            _ => Err(ParseMethodError::new(s)),
        }
    }
}
