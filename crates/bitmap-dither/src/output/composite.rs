//! Compositor: quantized samples to RGBA pixels.

use crate::color::Rgb;
use crate::raster::ChannelField;

use super::OutputMode;

/// Two-color palette for [`OutputMode::Palette`].
///
/// Bit 1 maps to `foreground`, bit 0 to `background`. Defaults to white on
/// black, which renders the same as Mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TwoColorPalette {
    pub foreground: Rgb,
    pub background: Rgb,
}

impl Default for TwoColorPalette {
    fn default() -> Self {
        Self {
            foreground: Rgb::WHITE,
            background: Rgb::BLACK,
        }
    }
}

impl TwoColorPalette {
    #[inline]
    pub fn new(foreground: Rgb, background: Rgb) -> Self {
        Self {
            foreground,
            background,
        }
    }
}

/// One quantized (or passthrough) sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Dithered luminance bit.
    Bit(bool),
    /// Tone-mapped grey value, not dithered.
    Level(f32),
    /// Independent R, G and B bits.
    Tri([bool; 3]),
}

#[inline]
fn gray_byte(value: f32) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.clamp(0.0, 255.0).round() as u8
    }
}

/// Map one sample to an opaque RGBA pixel.
///
/// - `Bit` in Palette mode: foreground / background
/// - `Bit` in any other mode: white / black
/// - `Level`: grey value replicated across R, G and B
/// - `Tri`: each channel 0 or 255
///
/// # Example
///
/// ```
/// use bitmap_dither::output::composite;
/// use bitmap_dither::{OutputMode, Rgb, Sample, TwoColorPalette};
///
/// let palette = TwoColorPalette::new(Rgb::new(255, 136, 0), Rgb::new(0, 0, 64));
/// assert_eq!(composite(Sample::Bit(true), OutputMode::Palette, &palette), [255, 136, 0, 255]);
/// assert_eq!(composite(Sample::Bit(true), OutputMode::Mono, &palette), [255, 255, 255, 255]);
/// ```
pub fn composite(sample: Sample, mode: OutputMode, palette: &TwoColorPalette) -> [u8; 4] {
    match sample {
        Sample::Bit(bit) => {
            let color = match (mode, bit) {
                (OutputMode::Palette, true) => palette.foreground,
                (OutputMode::Palette, false) => palette.background,
                (_, true) => Rgb::WHITE,
                (_, false) => Rgb::BLACK,
            };
            color.to_rgba()
        }
        Sample::Level(value) => {
            let v = gray_byte(value);
            [v, v, v, 255]
        }
        Sample::Tri([r, g, b]) => [
            if r { 255 } else { 0 },
            if g { 255 } else { 0 },
            if b { 255 } else { 0 },
            255,
        ],
    }
}

/// Composite a luminance bit field into RGBA bytes.
pub fn composite_bits(bits: &[u8], mode: OutputMode, palette: &TwoColorPalette) -> Vec<u8> {
    bits.iter()
        .flat_map(|&bit| composite(Sample::Bit(bit != 0), mode, palette))
        .collect()
}

/// Composite three per-channel bit fields into RGBA bytes.
pub fn composite_rgb(red: &[u8], green: &[u8], blue: &[u8]) -> Vec<u8> {
    debug_assert!(red.len() == green.len() && green.len() == blue.len());
    red.iter()
        .zip(green)
        .zip(blue)
        .flat_map(|((&r, &g), &b)| {
            composite(
                Sample::Tri([r != 0, g != 0, b != 0]),
                OutputMode::Rgb,
                &TwoColorPalette::default(),
            )
        })
        .collect()
}

/// Composite a tone-mapped field as a grey preview.
///
/// With `alpha`, each pixel takes its alpha from the matching sample instead
/// of 255.
pub fn composite_gray(field: &ChannelField, alpha: Option<&ChannelField>) -> Vec<u8> {
    let palette = TwoColorPalette::default();
    let mut rgba = Vec::with_capacity(field.len() * 4);
    for (i, &value) in field.samples().iter().enumerate() {
        let mut pixel = composite(Sample::Level(value), OutputMode::Gray, &palette);
        if let Some(alpha) = alpha {
            pixel[3] = gray_byte(alpha.samples()[i]);
        }
        rgba.extend_from_slice(&pixel);
    }
    rgba
}
