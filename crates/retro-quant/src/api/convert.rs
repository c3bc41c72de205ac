//! One-call conversion entry point.

use super::{ConvertError, RetroConverter};
use crate::raster::Raster;

/// Convert `raster` to a retro-style raster with at most `palette_size`
/// colors.
///
/// Builds an adaptive palette from every pixel with k-means, then either
/// dithers (`dithering == true`) or maps each pixel to its nearest palette
/// color. The output has the input's dimensions and contains only palette
/// colors.
///
/// For pixelation, fixed palettes or a different iteration cap use
/// [`RetroConverter`].
///
/// # Errors
///
/// - [`ConvertError::InvalidInput`] if `palette_size` is 0
/// - [`ConvertError::ResourceExhausted`] if `palette_size` exceeds 256
///
/// # Example
///
/// ```
/// use retro_quant::{convert_to_retro, Raster, Rgb};
///
/// let raster = Raster::from_rows(vec![
///     vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)],
///     vec![Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)],
/// ])
/// .unwrap();
///
/// let out = convert_to_retro(&raster, 2, true, 42).unwrap();
/// assert_eq!(out, raster);
/// ```
pub fn convert_to_retro(
    raster: &Raster,
    palette_size: usize,
    dithering: bool,
    seed: u64,
) -> Result<Raster, ConvertError> {
    let image = RetroConverter::new(palette_size)
        .dithering(dithering)
        .seed(seed)
        .convert(raster)?;
    Ok(image.to_raster())
}
