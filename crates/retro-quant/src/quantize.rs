//! Nearest-color quantization without error diffusion.

use crate::output::LabelMap;
use crate::palette::Palette;
use crate::raster::Raster;

/// Map every pixel to the index of its nearest palette color.
///
/// Distance is squared Euclidean in RGB; ties go to the lowest index.
/// Each pixel is independent of its neighbors.
///
/// # Example
///
/// ```
/// use retro_quant::{quantize, Palette, Raster, Rgb};
///
/// let raster = Raster::new(3, 1, vec![Rgb::new(0, 0, 0), Rgb::new(127, 127, 127), Rgb::new(128, 128, 128)]).unwrap();
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(quantize(&raster, &palette).labels(), &[0, 0, 1]);
/// ```
pub fn quantize(raster: &Raster, palette: &Palette) -> LabelMap {
    let labels = raster
        .pixels()
        .iter()
        .map(|&p| palette.find_nearest_rgb(p) as u8)
        .collect();
    LabelMap::from_parts(labels, raster.width(), raster.height())
}
