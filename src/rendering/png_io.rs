use std::io::Cursor;
use std::path::Path;

use bitmap_dither::PixelBuffer;

use crate::error::RenderError;

/// Decode PNG bytes into an RGBA8 [`PixelBuffer`].
///
/// Palette and low bit depth images are expanded and 16-bit samples are
/// stripped to 8 bits, so every input lands as grey, grey+alpha, RGB or RGBA
/// before being widened to RGBA.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, RenderError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| RenderError::PngDecode(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&v| [v, v, v, 255]).collect(),
        png::ColorType::Indexed => {
            return Err(RenderError::PngDecode(
                "indexed image was not expanded".to_string(),
            ))
        }
    };

    Ok(PixelBuffer::new(
        info.width as usize,
        info.height as usize,
        rgba,
    )?)
}

/// Read and decode a PNG file.
pub fn read_png(path: &Path) -> Result<PixelBuffer, RenderError> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes)
}

/// Encode RGBA8 pixels as a PNG and recompress it with oxipng.
pub fn encode_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, RenderError> {
    let (w, h) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
        _ => return Err(RenderError::UnsupportedDimensions { width, height }),
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, w, h);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        // Fast settings; oxipng re-compresses below
        encoder.set_compression(png::Compression::Fast);
        encoder.set_filter(png::FilterType::NoFilter);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(rgba)
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    // Two-color output shrinks a lot once oxipng picks palette/bit-depth reductions
    let optimized = oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    )
    .unwrap_or(png_bytes);
    Ok(optimized)
}

/// Encode and write a PNG file, returning the number of bytes written.
pub fn write_png(path: &Path, width: usize, height: usize, rgba: &[u8]) -> Result<usize, RenderError> {
    let bytes = encode_png(width, height, rgba)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len())
}
