//! Color types and the Color Reducer.
//!
//! - [`Rgb`]: 8-bit color triple, parsed from hex for palette configuration
//! - [`reduce`] / [`reduce_rgb`]: source raster to luminance or per-channel
//!   fields, at full source resolution
//!
//! # Example
//!
//! ```
//! use bitmap_dither::{reduce, PixelBuffer};
//!
//! let source = PixelBuffer::new(1, 1, vec![255, 255, 255, 255]).unwrap();
//! let field = reduce(&source);
//! assert!((field.get(0, 0) - 255.0).abs() < 1e-3);
//! ```

mod error;
mod luminance;
mod rgb;

pub use error::ParseColorError;
pub use luminance::{extract, luminance, reduce, reduce_rgb, Channel};
pub use rgb::Rgb;
