//! Error types for the bitmap-dither public API.
//!
//! The pipeline itself is total once a [`PixelBuffer`](crate::PixelBuffer)
//! exists. Errors only come from building that buffer and from parsing
//! parameter names and colors.

use std::fmt;

use crate::color::ParseColorError;

/// Unknown dithering method name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMethodError {
    name: String,
}

impl ParseMethodError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseMethodError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown dither method '{}' (expected ordered, floyd-steinberg, atkinson, sierra-lite or burkes)",
            self.name
        )
    }
}

impl std::error::Error for ParseMethodError {}

/// Unknown output mode name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseModeError {
    name: String,
}

impl ParseModeError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The rejected input.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ParseModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown output mode '{}' (expected mono, gray, palette or rgb)",
            self.name
        )
    }
}

impl std::error::Error for ParseModeError {}

/// Unified error type for the bitmap-dither public API.
///
/// # Example
///
/// ```
/// use bitmap_dither::{DitherError, DitherMethod, Rgb};
///
/// fn parse(method: &str, color: &str) -> Result<(DitherMethod, Rgb), DitherError> {
///     Ok((method.parse()?, color.parse()?))
/// }
///
/// assert!(parse("atkinson", "#fff").is_ok());
/// assert!(parse("atkinson", "#ggg").is_err());
/// ```
#[derive(Debug)]
pub enum DitherError {
    /// Zero dimension or a byte length that is not `width * height * 4`.
    InvalidBuffer {
        width: usize,
        height: usize,
        len: usize,
    },
    ParseColor(ParseColorError),
    ParseMethod(ParseMethodError),
    ParseMode(ParseModeError),
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::InvalidBuffer { width, height, len } => write!(
                f,
                "invalid pixel buffer: {}x{} RGBA needs {} bytes, got {}",
                width,
                height,
                width.saturating_mul(*height).saturating_mul(4),
                len
            ),
            DitherError::ParseColor(err) => write!(f, "color parse error: {}", err),
            DitherError::ParseMethod(err) => write!(f, "{}", err),
            DitherError::ParseMode(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::InvalidBuffer { .. } => None,
            DitherError::ParseColor(err) => Some(err),
            DitherError::ParseMethod(err) => Some(err),
            DitherError::ParseMode(err) => Some(err),
        }
    }
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::ParseColor(err)
    }
}

impl From<ParseMethodError> for DitherError {
    fn from(err: ParseMethodError) -> Self {
        DitherError::ParseMethod(err)
    }
}

impl From<ParseModeError> for DitherError {
    fn from(err: ParseModeError) -> Self {
        DitherError::ParseMode(err)
    }
}
