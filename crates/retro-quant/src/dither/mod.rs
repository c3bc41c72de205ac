//! Error diffusion dithering.
//!
//! Pixels are visited in plain raster order (left to right, top to bottom).
//! For each pixel:
//!
//! 1. Read the accumulated value: the source color plus any error pushed
//!    onto it by earlier pixels
//! 2. Clamp a copy to `0..=255` and pick the nearest palette color
//! 3. Compute the error as the *unclamped* accumulated value minus the
//!    chosen color
//! 4. Distribute the error to unvisited neighbors using the kernel weights,
//!    skipping neighbors outside the image
//!
//! The accumulator is never clamped, so large errors near saturated regions
//! keep propagating instead of being lost.

mod floyd_steinberg;
mod kernel;

pub use floyd_steinberg::{dither, dither_indices};
pub use kernel::{Kernel, FLOYD_STEINBERG};

use crate::output::LabelMap;
use crate::palette::Palette;
use crate::raster::Raster;

/// Working buffer for one dither pass.
///
/// Holds one `[f32; 3]` per pixel, seeded from the source raster. Owned by
/// a single pass and discarded afterward.
#[derive(Debug)]
pub struct ErrorAccumulator {
    width: usize,
    height: usize,
    values: Vec<[f32; 3]>,
}

impl ErrorAccumulator {
    /// Seed the accumulator with the raster's colors.
    pub fn new(raster: &Raster) -> Self {
        Self {
            width: raster.width(),
            height: raster.height(),
            values: raster.pixels().iter().map(|p| p.to_f32()).collect(),
        }
    }

    /// Accumulated value at `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.values[y * self.width + x]
    }

    /// Add `error` to the pixel at `(x, y)`.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: i64, y: i64, error: [f32; 3]) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let v = &mut self.values[y as usize * self.width + x as usize];
        v[0] += error[0];
        v[1] += error[1];
        v[2] += error[2];
    }

    /// Spread `error` from `(x, y)` to its kernel neighbors.
    #[inline]
    pub fn diffuse(&mut self, x: usize, y: usize, error: [f32; 3], kernel: &Kernel) {
        let divisor = kernel.divisor as f32;
        for &(dx, dy, weight) in kernel.entries {
            let w = weight as f32 / divisor;
            self.add_error(
                x as i64 + dx as i64,
                y as i64 + dy as i64,
                [error[0] * w, error[1] * w, error[2] * w],
            );
        }
    }
}

/// Error diffusion over `raster` with the given kernel.
pub(crate) fn dither_with_kernel(raster: &Raster, palette: &Palette, kernel: &Kernel) -> LabelMap {
    let width = raster.width();
    let height = raster.height();
    let mut acc = ErrorAccumulator::new(raster);
    let mut labels = Vec::with_capacity(width * height);

    for y in 0..height {
        for x in 0..width {
            let value = acc.get(x, y);
            let lookup = [
                value[0].clamp(0.0, 255.0),
                value[1].clamp(0.0, 255.0),
                value[2].clamp(0.0, 255.0),
            ];
            let idx = palette.find_nearest(lookup);
            labels.push(idx as u8);

            let chosen = palette.get(idx).to_f32();
            let error = [
                value[0] - chosen[0],
                value[1] - chosen[1],
                value[2] - chosen[2],
            ];
            acc.diffuse(x, y, error, kernel);
        }
    }

    LabelMap::from_parts(labels, width, height)
}
