//! Floyd-Steinberg dithering entry points.

use super::{dither_with_kernel, FLOYD_STEINBERG};
use crate::api::ConvertError;
use crate::output::LabelMap;
use crate::palette::Palette;
use crate::raster::Raster;

/// Dither `raster` to `palette` with Floyd-Steinberg error diffusion and
/// return palette indices.
///
/// Every output index is valid for `palette`. Empty palettes and
/// zero-sized rasters are rejected when those values are constructed, so
/// this never fails for values built through the public constructors.
///
/// # Example
///
/// ```
/// use retro_quant::{dither_indices, Palette, Raster, Rgb};
///
/// let raster = Raster::new(4, 1, vec![Rgb::new(128, 128, 128); 4]).unwrap();
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let labels = dither_indices(&raster, &palette).unwrap();
///
/// // Mid-gray alternates between black and white.
/// assert_eq!(labels.labels(), &[1, 0, 1, 0]);
/// ```
pub fn dither_indices(raster: &Raster, palette: &Palette) -> Result<LabelMap, ConvertError> {
    let labels = dither_with_kernel(raster, palette, &FLOYD_STEINBERG);
    tracing::debug!(
        width = raster.width(),
        height = raster.height(),
        colors = palette.len(),
        "Dithered raster"
    );
    Ok(labels)
}

/// Dither `raster` to `palette` and return the palette-colored raster.
///
/// Same dimensions as the input; every pixel is a palette color.
pub fn dither(raster: &Raster, palette: &Palette) -> Result<Raster, ConvertError> {
    Ok(dither_indices(raster, palette)?.to_raster(palette))
}
