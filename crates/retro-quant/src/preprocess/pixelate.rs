//! Block-mean pixelation.

use crate::api::ConvertError;
use crate::color::Rgb;
use crate::raster::Raster;

/// Replace every `block_size x block_size` block with its mean color.
///
/// Blocks are anchored at the top-left corner. Trailing blocks on the right
/// and bottom edges may be smaller and average only the pixels they cover.
/// The output has the input's dimensions. Channel means round to nearest,
/// halves up.
///
/// # Errors
///
/// [`ConvertError::InvalidInput`] if `block_size` is 0.
pub fn pixelate(raster: &Raster, block_size: usize) -> Result<Raster, ConvertError> {
    if block_size == 0 {
        return Err(ConvertError::invalid("pixelation block size must be at least 1"));
    }
    if block_size == 1 {
        return Ok(raster.clone());
    }

    let width = raster.width();
    let height = raster.height();
    let src = raster.pixels();
    let mut out = vec![Rgb::default(); src.len()];

    for by in (0..height).step_by(block_size) {
        let y_end = (by + block_size).min(height);
        for bx in (0..width).step_by(block_size) {
            let x_end = (bx + block_size).min(width);

            let mut sum = [0u64; 3];
            for y in by..y_end {
                for p in &src[y * width + bx..y * width + x_end] {
                    sum[0] += p.r as u64;
                    sum[1] += p.g as u64;
                    sum[2] += p.b as u64;
                }
            }
            let n = ((y_end - by) * (x_end - bx)) as u64;
            let mean = Rgb::new(
                ((sum[0] + n / 2) / n) as u8,
                ((sum[1] + n / 2) / n) as u8,
                ((sum[2] + n / 2) / n) as u8,
            );

            for y in by..y_end {
                out[y * width + bx..y * width + x_end].fill(mean);
            }
        }
    }

    tracing::trace!(width, height, block_size, "Pixelated raster");
    Ok(Raster::from_parts(width, height, out))
}

/// Pixelate so the longer side spans about `cells` blocks.
///
/// The block size is `ceil(max(width, height) / cells)`, at least 1, so an
/// image already smaller than `cells` on both sides is returned unchanged.
///
/// # Errors
///
/// [`ConvertError::InvalidInput`] if `cells` is 0.
///
/// # Example
///
/// ```
/// use retro_quant::{pixelate_to_cells, Raster, Rgb};
///
/// let raster = Raster::new(256, 128, vec![Rgb::new(9, 9, 9); 256 * 128]).unwrap();
/// let out = pixelate_to_cells(&raster, 64).unwrap();
/// assert_eq!((out.width(), out.height()), (256, 128));
/// ```
pub fn pixelate_to_cells(raster: &Raster, cells: usize) -> Result<Raster, ConvertError> {
    if cells == 0 {
        return Err(ConvertError::invalid("pixelation cell count must be at least 1"));
    }
    let long_side = raster.width().max(raster.height());
    let block_size = long_side.div_ceil(cells).max(1);
    pixelate(raster, block_size)
}
