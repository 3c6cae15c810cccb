//! Tone Mapper.
//!
//! Brightness, contrast, gamma, threshold offset and levels correction,
//! applied per sample to the downsampled working field. Operating on the
//! working field matters beyond speed: the levels bounds also rescale the
//! quantizer's threshold (see [`crate::effective_threshold`]), so both
//! corrections have to see the same samples.

mod mapper;
mod options;

pub use mapper::{apply_tone, tone_sample};
pub use options::{ToneParameters, LEVELS_MIN_SPAN};
