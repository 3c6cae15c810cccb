//! The finished working-resolution raster.

/// RGBA8 output of the pipeline at the working resolution.
///
/// Display and export sizes are reached by nearest-neighbor block
/// replication of this raster; it is never smoothed.
///
/// # Example
///
/// ```
/// use bitmap_dither::DitheredImage;
///
/// let image = DitheredImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]);
/// assert_eq!(image.pixel(1, 0), [255, 255, 255, 255]);
/// assert_eq!(image.as_rgba().len(), 2 * 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitheredImage {
    width: usize,
    height: usize,
    rgba: Vec<u8>,
}

impl DitheredImage {
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `rgba.len() == width * height * 4`.
    pub fn new(width: usize, height: usize, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(
            rgba.len(),
            width * height * 4,
            "rgba length ({}) must match width * height * 4 ({}x{})",
            rgba.len(),
            width,
            height,
        );
        Self {
            width,
            height,
            rgba,
        }
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
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.rgba
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    #[inline]
    pub fn as_rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.rgba
    }
}
