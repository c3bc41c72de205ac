//! Per-pixel palette indices.

use crate::api::ConvertError;
use crate::palette::Palette;
use crate::raster::{check_dimensions, Raster};

/// A `height x width` grid of palette indices in row-major order.
///
/// Indices are `u8` because a [`Palette`] holds at most 256 colors.
///
/// # Example
///
/// ```
/// use retro_quant::{quantize, Palette, Raster, Rgb};
///
/// let raster = Raster::from_rows(vec![vec![Rgb::new(10, 10, 10), Rgb::new(240, 240, 240)]]).unwrap();
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
///
/// let labels = quantize(&raster, &palette);
/// assert_eq!(labels.labels(), &[0, 1]);
/// assert_eq!(labels.to_raster(&palette).get(1, 0), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: usize,
    height: usize,
    labels: Vec<u8>,
}

impl LabelMap {
    /// Create a label map from row-major indices.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidInput`] if either dimension is zero or
    /// `labels.len() != width * height`; [`ConvertError::ResourceExhausted`]
    /// past [`MAX_PIXELS`](crate::MAX_PIXELS).
    pub fn new(labels: Vec<u8>, width: usize, height: usize) -> Result<Self, ConvertError> {
        check_dimensions(width, height)?;
        if labels.len() != width * height {
            return Err(ConvertError::invalid(format!(
                "labels length {} does not match dimensions {}x{}",
                labels.len(),
                width,
                height
            )));
        }
        Ok(Self::from_parts(labels, width, height))
    }

    /// Assemble a label map produced by a full scan of a valid raster.
    pub(crate) fn from_parts(labels: Vec<u8>, width: usize, height: usize) -> Self {
        debug_assert_eq!(labels.len(), width * height);
        Self {
            width,
            height,
            labels,
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

    /// Indices in row-major order.
    #[inline]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Index at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        assert!(x < self.width && y < self.height, "label ({x}, {y}) out of bounds");
        self.labels[y * self.width + x]
    }

    /// Replace every index with its palette color.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of range for `palette`.
    pub fn to_raster(&self, palette: &Palette) -> Raster {
        let pixels = self
            .labels
            .iter()
            .map(|&idx| palette.get(idx as usize))
            .collect();
        Raster::from_parts(self.width, self.height, pixels)
    }
}
