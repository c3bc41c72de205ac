//! RetroImage: the result of a full conversion.
//!
//! [`RetroImage`] keeps the indexed form as canonical and computes RGB
//! output on demand, which lets callers write palette-based formats such as
//! indexed PNG without re-quantizing.

use super::LabelMap;
use crate::api::ConvertError;
use crate::palette::Palette;
use crate::raster::Raster;

/// Palette indices plus the palette they refer to.
///
/// # Example
///
/// ```
/// use retro_quant::{LabelMap, Palette, RetroImage, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let labels = LabelMap::new(vec![0, 1, 1, 0], 2, 2).unwrap();
/// let image = RetroImage::new(labels, palette).unwrap();
///
/// assert_eq!(image.indices(), &[0, 1, 1, 0]);
/// assert_eq!(image.to_rgb_bytes().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetroImage {
    labels: LabelMap,
    palette: Palette,
}

impl RetroImage {
    /// Bundle a label map with its palette.
    ///
    /// # Errors
    ///
    /// [`ConvertError::InvalidInput`] if a label does not index into
    /// `palette`.
    pub fn new(labels: LabelMap, palette: Palette) -> Result<Self, ConvertError> {
        if let Some(&bad) = labels
            .labels()
            .iter()
            .find(|&&i| i as usize >= palette.len())
        {
            return Err(ConvertError::invalid(format!(
                "label {} out of range for palette of {} colors",
                bad,
                palette.len()
            )));
        }
        Ok(Self { labels, palette })
    }

    /// Palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        self.labels.labels()
    }

    #[inline]
    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.labels.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.labels.height()
    }

    /// Materialize palette colors as a raster.
    pub fn to_raster(&self) -> Raster {
        self.labels.to_raster(&self.palette)
    }

    /// Packed `[R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices().len() * 3);
        for &idx in self.indices() {
            rgb.extend_from_slice(&self.palette.get(idx as usize).to_bytes());
        }
        rgb
    }
}
