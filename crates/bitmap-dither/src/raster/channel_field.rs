//! Single-channel floating point field.

/// A `width x height` array of `f32` samples for one scalar channel.
///
/// Samples are nominally in `[0, 255]`. During error diffusion they may
/// transiently leave that range; the quantizer clamps on read.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelField {
    width: usize,
    height: usize,
    samples: Vec<f32>,
}

impl ChannelField {
    /// Wrap existing samples (row-major).
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `samples.len() == width * height`.
    pub fn new(width: usize, height: usize, samples: Vec<f32>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width * height,
            "samples length ({}) must match width * height ({}x{})",
            samples.len(),
            width,
            height,
        );
        Self {
            width,
            height,
            samples,
        }
    }

    /// A field where every sample is `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self::new(width, height, vec![value; width * height])
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.samples[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.samples[y * self.width + x] = value;
    }

    /// Add `delta` to the sample at `(x, y)`.
    #[inline]
    pub fn add(&mut self, x: usize, y: usize, delta: f32) {
        self.samples[y * self.width + x] += delta;
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
