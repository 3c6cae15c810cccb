//! Source images written as PNG files into temporary directories.

use std::path::{Path, PathBuf};

use bitmap_dither::PixelBuffer;

/// Horizontal grey ramp from black to white.
pub fn gray_ramp(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.saturating_sub(1).max(1)) as u8;
        [v, v, v, 255]
    })
    .unwrap()
}

/// Uniform opaque grey.
pub fn flat_gray(width: usize, height: usize, value: u8) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |_, _| [value, value, value, 255]).unwrap()
}

/// Color wheel-ish test card with a transparent left half.
pub fn half_transparent_card(width: usize, height: usize) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let r = (x * 255 / width.max(1)) as u8;
        let g = (y * 255 / height.max(1)) as u8;
        let a = if x < width / 2 { 0 } else { 255 };
        [r, g, 128, a]
    })
    .unwrap()
}

/// Encode a buffer as a plain RGBA PNG.
pub fn png_bytes(buffer: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, buffer.width() as u32, buffer.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(buffer.as_bytes()).unwrap();
    }
    out
}

/// Write `buffer` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, buffer: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(buffer)).unwrap();
    path
}

/// Write a YAML preset to `dir/name` and return the path.
pub fn write_preset(dir: &Path, name: &str, yaml: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, yaml).unwrap();
    path
}
