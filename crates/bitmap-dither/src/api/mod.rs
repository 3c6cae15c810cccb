//! Public API for the bitmap-dither crate.
//!
//! This module provides the high-level API: the [`Ditherer`] builder and the
//! [`DitherError`] error type.

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::{DitherError, ParseMethodError, ParseModeError};
