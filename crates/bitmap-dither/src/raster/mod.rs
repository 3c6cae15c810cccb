//! Raster types shared by every pipeline stage.
//!
//! - [`PixelBuffer`]: caller-owned RGBA8 source raster, read-only to the core
//! - [`ChannelField`]: one scalar `f32` sample per pixel, owned by a single
//!   pipeline invocation and mutated in place by tone mapping and diffusion

mod channel_field;
mod pixel_buffer;

pub use channel_field::ChannelField;
pub use pixel_buffer::PixelBuffer;
