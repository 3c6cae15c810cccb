#![allow(clippy::needless_range_loop, clippy::manual_range_contains)]

//! bitmap-dither: deterministic image-to-bitmap dithering
//!
//! This library turns an RGBA raster into a small, working-resolution bitmap
//! made of a two-color palette (or per-channel RGB bits, or a plain grey
//! preview). It is a pure pixel transform: the same source and parameters
//! always produce the same bytes, unless glitch noise is explicitly requested.
//!
//! # Quick Start
//!
//! The [`Ditherer`] builder is the primary entry point:
//!
//! ```
//! use bitmap_dither::{DitherMethod, Ditherer, OutputMode, PixelBuffer};
//!
//! let source = PixelBuffer::new(2, 2, vec![128; 2 * 2 * 4]).unwrap();
//!
//! let ditherer = Ditherer::new()
//!     .method(DitherMethod::Atkinson)
//!     .mode(OutputMode::Mono);
//! let result = ditherer.dither(&source);
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.height(), 2);
//! ```
//!
//! # Pipeline Overview
//!
//! ```text
//! PixelBuffer (RGBA8, source resolution)
//!     |
//!     v
//! [Color Reducer]   luminance 0.299 R + 0.587 G + 0.114 B
//!     |             (or R, G, B fields independently in RGB mode)
//!     v
//! [Resampler]       nearest-neighbor down to the working resolution
//!     |
//!     v
//! [Tone Mapper]     brightness -> contrast -> gamma -> offset -> levels
//!     |             -> glitch noise -> clamp [0, 255]
//!     v
//! [Quantizer]       ordered Bayer 4x4, or error diffusion
//!     |             (Floyd-Steinberg, Atkinson, Sierra Lite, Burkes)
//!     v
//! [Compositor]      bit -> black/white, foreground/background, RGB bits
//!     |
//!     v
//! DitheredImage (RGBA8, working resolution)
//! ```
//!
//! Upscaling the working raster back to a display or export size is left to
//! the caller, and must be a nearest-neighbor block replication.
//!
//! # Thresholds
//!
//! Two thresholding conventions coexist and are deliberately kept apart:
//!
//! - Error diffusion in Mono/Palette mode compares against
//!   `128 * 255 / (white_point - black_point)`, see [`effective_threshold`].
//! - Error diffusion in RGB mode compares every channel against a fixed 128,
//!   see [`FIXED_THRESHOLD`].
//! - Ordered dithering compares normalized luminance against the Bayer cell
//!   `(rank + 0.5) / 16` and ignores both of the above.
//!
//! # Numeric Edge Cases
//!
//! The pipeline never fails once a [`PixelBuffer`] exists. A collapsed levels
//! range is widened to [`LEVELS_MIN_SPAN`], a negative gamma base is read as
//! zero, a non-positive gamma is a no-op, a tiny scale still yields a 1x1
//! working raster, and non-finite carried error is dropped instead of being
//! diffused across the field.

pub mod api;
pub mod color;
pub mod dither;
pub mod noise;
pub mod output;
pub mod raster;
pub mod resample;
pub mod tone;


pub use api::{DitherError, Ditherer, ParseMethodError, ParseModeError};
pub use color::{extract, reduce, reduce_rgb, Channel, ParseColorError, Rgb};
pub use dither::{
    effective_threshold, DitherMethod, Kernel, QuantizeOptions, Threshold, BAYER_4X4,
    FIXED_THRESHOLD,
};
pub use noise::Glitch;
pub use output::{AlphaPolicy, DitheredImage, OutputMode, Sample, TwoColorPalette};
pub use raster::{ChannelField, PixelBuffer};
pub use resample::{
    downsample, downsample_alpha, working_dimensions, ScaleParameters, MAX_SCALE_PERCENT,
};
pub use tone::{apply_tone, ToneParameters, LEVELS_MIN_SPAN};
