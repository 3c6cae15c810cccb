//! Ditherer builder, the primary entry point for the crate.
//!
//! [`Ditherer`] holds one immutable parameter snapshot and runs the whole
//! pipeline (reduce, downsample, tone, quantize, composite) per call.

use crate::color::{reduce, reduce_rgb};
use crate::dither::{DitherMethod, QuantizeOptions, Threshold};
use crate::noise::Glitch;
use crate::output::{
    composite_bits, composite_gray, composite_rgb, AlphaPolicy, DitheredImage, OutputMode,
    TwoColorPalette,
};
use crate::raster::{ChannelField, PixelBuffer};
use crate::resample::{downsample, downsample_alpha, working_dimensions, ScaleParameters};
use crate::tone::{apply_tone, ToneParameters};

/// High-level dithering builder.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - [`dither()`](Self::dither) takes `&self`, so one snapshot is reusable
///   across images and video frames
/// - Each call allocates its own working fields and glitch source; nothing
///   carries over from one call to the next
///
/// # Example
///
/// ```
/// use bitmap_dither::{Ditherer, OutputMode, PixelBuffer, Rgb, TwoColorPalette};
///
/// let source = PixelBuffer::from_fn(8, 8, |x, _| {
///     let v = (x * 32) as u8;
///     [v, v, v, 255]
/// })
/// .unwrap();
///
/// let ditherer = Ditherer::new()
///     .mode(OutputMode::Palette)
///     .palette(TwoColorPalette::new(Rgb::new(255, 200, 0), Rgb::new(20, 0, 60)))
///     .scale(50.0);
///
/// let result = ditherer.dither(&source);
/// assert_eq!((result.width(), result.height()), (4, 4));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ditherer {
    tone: ToneParameters,
    quantize: QuantizeOptions,
    scale: ScaleParameters,
    mode: OutputMode,
    palette: TwoColorPalette,
    alpha: AlphaPolicy,
    seed: Option<u64>,
}

impl Ditherer {
    /// Floyd-Steinberg, Mono, full scale, identity tone, no glitch.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn method(mut self, method: DitherMethod) -> Self {
        self.quantize = self.quantize.method(method);
        self
    }

    #[inline]
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = mode;
        self
    }

    #[inline]
    pub fn tone(mut self, tone: ToneParameters) -> Self {
        self.tone = tone;
        self
    }

    /// Set the working-resolution percentage, capped at
    /// [`MAX_SCALE_PERCENT`](crate::resample::MAX_SCALE_PERCENT).
    #[inline]
    pub fn scale(mut self, scale_percent: f32) -> Self {
        self.scale = ScaleParameters::new(scale_percent);
        self
    }

    #[inline]
    pub fn dither_strength(mut self, strength: f32) -> Self {
        self.quantize = self.quantize.dither_strength(strength);
        self
    }

    /// Set glitch intensity (`0..=100`).
    #[inline]
    pub fn glitch(mut self, intensity: f32) -> Self {
        self.quantize = self.quantize.glitch(intensity);
        self
    }

    /// Replace method, strength and glitch at once.
    #[inline]
    pub fn quantize_options(mut self, options: QuantizeOptions) -> Self {
        self.quantize = options;
        self
    }

    #[inline]
    pub fn palette(mut self, palette: TwoColorPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Alpha handling; only [`OutputMode::Gray`] honours
    /// [`AlphaPolicy::PreserveSource`].
    #[inline]
    pub fn alpha(mut self, policy: AlphaPolicy) -> Self {
        self.alpha = policy;
        self
    }

    /// Seed the glitch RNG so noisy runs are reproducible.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn tone_parameters(&self) -> &ToneParameters {
        &self.tone
    }

    pub fn quantize_parameters(&self) -> &QuantizeOptions {
        &self.quantize
    }

    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    /// Working dimensions this snapshot produces for a source size.
    pub fn working_dimensions(&self, width: usize, height: usize) -> (usize, usize) {
        working_dimensions(width, height, &self.scale)
    }

    /// Run the pipeline on one source raster.
    ///
    /// Reduction runs at source resolution, then the field is downsampled to
    /// the working resolution, tone-mapped, quantized and composited. The
    /// result is at the working resolution.
    pub fn dither(&self, source: &PixelBuffer) -> DitheredImage {
        let (width, height) = self.working_dimensions(source.width(), source.height());
        let mut glitch = Glitch::new(self.quantize.glitch, self.seed);
        let method = self.quantize.method;

        let rgba = match self.mode {
            OutputMode::Rgb => {
                let mut channels = reduce_rgb(source).map(|c| downsample(&c, width, height));
                for channel in channels.iter_mut() {
                    apply_tone(channel, &self.tone, &mut glitch);
                }
                let [r, g, b] = channels.map(|mut channel| {
                    method.quantize(&mut channel, Threshold::Fixed, &self.quantize, &mut glitch)
                });
                composite_rgb(&r, &g, &b)
            }
            OutputMode::Gray => {
                let field = self.working_luminance(source, width, height, &mut glitch);
                let alpha = match self.alpha {
                    AlphaPolicy::Opaque => None,
                    AlphaPolicy::PreserveSource => Some(downsample_alpha(source, width, height)),
                };
                composite_gray(&field, alpha.as_ref())
            }
            OutputMode::Mono | OutputMode::Palette => {
                let mut field = self.working_luminance(source, width, height, &mut glitch);
                let bits = method.quantize(
                    &mut field,
                    Threshold::levels(&self.tone),
                    &self.quantize,
                    &mut glitch,
                );
                composite_bits(&bits, self.mode, &self.palette)
            }
        };

        DitheredImage::new(width, height, rgba)
    }

    fn working_luminance(
        &self,
        source: &PixelBuffer,
        width: usize,
        height: usize,
        glitch: &mut Glitch,
    ) -> ChannelField {
        let mut field = downsample(&reduce(source), width, height);
        apply_tone(&mut field, &self.tone, glitch);
        field
    }
}
