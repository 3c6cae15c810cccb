//! ditherlab - deterministic bitmap dithering for PNG images and frame sequences
//!
//! Command line front end for the `bitmap-dither` pipeline. This library
//! exposes the PNG I/O, preset and render modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
