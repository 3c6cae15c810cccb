//! Assertion helpers for tests.

use std::collections::BTreeSet;
use std::path::Path;

use bitmap_dither::PixelBuffer;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the file exists and is a PNG, then decode it.
pub fn assert_png_file(path: &Path) -> PixelBuffer {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG signature in {}, got {:?}",
        path.display(),
        &bytes[..8.min(bytes.len())]
    );
    ditherlab::rendering::decode_png(&bytes).unwrap()
}

/// Assert image dimensions.
pub fn assert_dimensions(image: &PixelBuffer, width: usize, height: usize) {
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected image dimensions"
    );
}

/// Distinct RGBA values of an image.
pub fn distinct_pixels(image: &PixelBuffer) -> BTreeSet<[u8; 4]> {
    image.pixels().collect()
}

/// Assert every pixel is one of `allowed`.
pub fn assert_only_colors(image: &PixelBuffer, allowed: &[[u8; 4]]) {
    for (i, px) in image.pixels().enumerate() {
        assert!(
            allowed.contains(&px),
            "Pixel {} ({}, {}) is {:?}, expected one of {:?}",
            i,
            i % image.width(),
            i / image.width(),
            px,
            allowed
        );
    }
}
