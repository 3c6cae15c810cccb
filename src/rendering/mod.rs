pub mod png_io;
pub mod upscale;

pub use png_io::{decode_png, encode_png, read_png, write_png};
pub use upscale::{upscale_nearest, UpscalePolicy};
