//! Compositor and the working-resolution output raster.
//!
//! - [`OutputMode`] / [`AlphaPolicy`]: what the final pixels look like
//! - [`composite`]: one quantized sample to one RGBA pixel
//! - [`DitheredImage`]: the finished RGBA raster

mod composite;
mod dithered_image;

use std::fmt;
use std::str::FromStr;

use crate::api::ParseModeError;

pub use composite::{
    composite, composite_bits, composite_gray, composite_rgb, Sample, TwoColorPalette,
};
pub use dithered_image::DitheredImage;

/// How quantized samples become output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputMode {
    /// Luminance dithered to pure black and white.
    #[default]
    Mono,

    /// Tone-mapped luminance as a continuous grey preview. No dithering.
    Gray,

    /// Luminance dithered to the two palette colors.
    Palette,

    /// R, G and B dithered independently, each channel driven to 0 or 255.
    Rgb,
}

impl OutputMode {
    pub const ALL: [OutputMode; 4] = [
        OutputMode::Mono,
        OutputMode::Gray,
        OutputMode::Palette,
        OutputMode::Rgb,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputMode::Mono => "mono",
            OutputMode::Gray => "gray",
            OutputMode::Palette => "palette",
            OutputMode::Rgb => "rgb",
        }
    }

    /// Whether this mode runs the Quantizer at all.
    pub fn is_dithered(self) -> bool {
        !matches!(self, OutputMode::Gray)
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mono" | "monochrome" => Ok(OutputMode::Mono),
            "gray" | "grey" | "grayscale" | "greyscale" => Ok(OutputMode::Gray),
            "palette" => Ok(OutputMode::Palette),
            "rgb" => Ok(OutputMode::Rgb),
            _ => Err(ParseModeError::new(s)),
        }
    }
}

/// Alpha handling for the output raster.
///
/// Dithered modes are always opaque. [`AlphaPolicy::PreserveSource`] only
/// affects [`OutputMode::Gray`], where the downsampled source alpha is copied
/// into the preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlphaPolicy {
    #[default]
    Opaque,
    PreserveSource,
}
