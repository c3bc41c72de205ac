//! Row-major RGB raster.
//!
//! [`Raster`] is the input and output image type of every operation in the
//! crate. It is validated once at construction, so downstream code can rely
//! on non-zero dimensions and `pixels.len() == width * height`.

use crate::api::ConvertError;
use crate::color::Rgb;

/// Upper bound on `width * height` accepted by [`Raster`] constructors.
///
/// 64 Mi pixels. The dither accumulator needs 12 bytes per pixel, so this
/// caps a single conversion at well under 1 GiB of scratch memory.
pub const MAX_PIXELS: usize = 64 * 1024 * 1024;

/// An immutable `height x width` grid of pixels in row-major order.
///
/// # Example
///
/// ```
/// use retro_quant::{Raster, Rgb};
///
/// let raster = Raster::from_rows(vec![
///     vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
///     vec![Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)],
/// ])
/// .unwrap();
///
/// assert_eq!(raster.width(), 2);
/// assert_eq!(raster.height(), 2);
/// assert_eq!(raster.get(1, 0), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl Raster {
    /// Create a raster from a flat row-major pixel buffer.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidInput`] if either dimension is zero or
    ///   `pixels.len() != width * height`
    /// - [`ConvertError::ResourceExhausted`] if `width * height` exceeds
    ///   [`MAX_PIXELS`]
    pub fn new(width: usize, height: usize, pixels: Vec<Rgb>) -> Result<Self, ConvertError> {
        check_dimensions(width, height)?;
        if pixels.len() != width * height {
            return Err(ConvertError::invalid(format!(
                "pixel buffer length {} does not match dimensions {}x{}",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster from a 2-D grid of rows.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidInput`] if there are no rows, the rows are
    /// empty, or the rows have unequal lengths.
    pub fn from_rows(rows: Vec<Vec<Rgb>>) -> Result<Self, ConvertError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(y) = rows.iter().position(|row| row.len() != width) {
            return Err(ConvertError::invalid(format!(
                "row {} has length {}, expected {}",
                y,
                rows[y].len(),
                width
            )));
        }
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// Create a raster from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidInput`] if the byte count is not
    /// `width * height * 3`, plus the errors of [`Raster::new`].
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self, ConvertError> {
        check_dimensions(width, height)?;
        if bytes.len() != width * height * 3 {
            return Err(ConvertError::invalid(format!(
                "RGB buffer length {} does not match dimensions {}x{} (expected {})",
                bytes.len(),
                width,
                height,
                width * height * 3
            )));
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(width, height, pixels)
    }

    /// Assemble a raster whose dimensions were already validated.
    pub(crate) fn from_parts(width: usize, height: usize, pixels: Vec<Rgb>) -> Self {
        debug_assert_eq!(pixels.len(), width * height);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        self.pixels[y * self.width + x]
    }

    /// Packed `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.to_bytes()).collect()
    }
}

/// Validate raster dimensions against the non-zero and size-ceiling rules.
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), ConvertError> {
    if width == 0 || height == 0 {
        return Err(ConvertError::invalid(format!(
            "raster dimensions must be non-zero, got {}x{}",
            width, height
        )));
    }
    match width.checked_mul(height) {
        Some(n) if n <= MAX_PIXELS => Ok(()),
        _ => Err(ConvertError::exhausted(format!(
            "raster {}x{} exceeds the {} pixel limit",
            width, height, MAX_PIXELS
        ))),
    }
}
