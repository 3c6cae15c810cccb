use std::fmt;
use std::str::FromStr;

use bitmap_dither::DitheredImage;

use crate::error::ConfigError;

/// Upper bound for an integer upscale factor.
pub const MAX_UPSCALE_FACTOR: u32 = 64;

/// How the working-resolution raster is enlarged for export.
///
/// Every policy is a nearest-neighbor block replication; nothing is ever
/// smoothed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpscalePolicy {
    /// Back to the source image dimensions.
    #[default]
    Source,
    /// Multiply both working dimensions by a fixed factor.
    Factor(u32),
    /// Export the working raster as-is.
    None,
}

impl UpscalePolicy {
    /// Export dimensions for a working raster of `working` cut from a source
    /// of `source`.
    pub fn target_dimensions(
        self,
        working: (usize, usize),
        source: (usize, usize),
    ) -> (usize, usize) {
        match self {
            UpscalePolicy::Source => source,
            UpscalePolicy::Factor(n) => (
                working.0.saturating_mul(n as usize),
                working.1.saturating_mul(n as usize),
            ),
            UpscalePolicy::None => working,
        }
    }
}

impl fmt::Display for UpscalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpscalePolicy::Source => f.write_str("source"),
            UpscalePolicy::Factor(n) => write!(f, "{n}"),
            UpscalePolicy::None => f.write_str("none"),
        }
    }
}

impl FromStr for UpscalePolicy {
    type Err = ConfigError;

    /// Accepts `source`, `none`, or a factor such as `4` or `4x`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "source" => Ok(UpscalePolicy::Source),
            "none" | "off" => Ok(UpscalePolicy::None),
            other => {
                let digits = other.strip_suffix('x').unwrap_or(other);
                match digits.parse::<u32>() {
                    Ok(n) if (1..=MAX_UPSCALE_FACTOR).contains(&n) => Ok(UpscalePolicy::Factor(n)),
                    _ => Err(ConfigError::InvalidValue {
                        key: "upscale",
                        message: format!(
                            "expected 'source', 'none' or a factor 1..={MAX_UPSCALE_FACTOR}, got '{other}'"
                        ),
                    }),
                }
            }
        }
    }
}

/// Nearest-neighbor resize of an RGBA image to `target_w x target_h`.
///
/// Target pixel `(x, y)` copies source pixel
/// `(floor(x * w / target_w), floor(y * h / target_h))`.
pub fn upscale_nearest(image: &DitheredImage, target_w: usize, target_h: usize) -> Vec<u8> {
    let (w, h) = (image.width(), image.height());
    if (target_w, target_h) == (w, h) {
        return image.as_rgba().to_vec();
    }

    let columns: Vec<usize> = (0..target_w)
        .map(|x| ((x as u128 * w as u128) / target_w as u128) as usize)
        .collect();
    let mut rgba = Vec::with_capacity(target_w * target_h * 4);
    for y in 0..target_h {
        let sy = ((y as u128 * h as u128) / target_h as u128) as usize;
        for &sx in &columns {
            rgba.extend_from_slice(&image.pixel(sx, sy));
        }
    }
    rgba
}
