//! RGBA8 source raster.

use crate::api::DitherError;

/// A rectangular RGBA8 raster, row-major, origin top-left.
///
/// Four interleaved 8-bit channels per pixel. The buffer is validated once on
/// construction; after that every pipeline stage can index it without checks.
///
/// # Example
///
/// ```
/// use bitmap_dither::PixelBuffer;
///
/// let buffer = PixelBuffer::new(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
/// assert_eq!(buffer.pixel(1, 0), [0, 0, 255, 255]);
///
/// assert!(PixelBuffer::new(2, 2, vec![0; 3]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap interleaved RGBA bytes.
    ///
    /// # Errors
    ///
    /// [`DitherError::InvalidBuffer`] if either dimension is zero or
    /// `data.len() != width * height * 4`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, DitherError> {
        let expected = width.checked_mul(height).and_then(|n| n.checked_mul(4));
        if width == 0 || height == 0 || expected != Some(data.len()) {
            return Err(DitherError::InvalidBuffer {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Result<Self, DitherError>
    where
        F: FnMut(usize, usize) -> [u8; 4],
    {
        let mut data = Vec::with_capacity(width.saturating_mul(height).saturating_mul(4));
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// RGBA of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the raster.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}
