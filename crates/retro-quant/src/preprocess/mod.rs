//! Pre-passes applied to a raster before palette construction.
//!
//! Pixelation replaces each square block with its mean color. Large flat
//! blocks give the chunky look of low-resolution art and also shrink the
//! color histogram the palette builder has to cluster.
//!
//! ```
//! use retro_quant::{pixelate, Raster, Rgb};
//!
//! let raster = Raster::new(2, 1, vec![Rgb::new(0, 0, 0), Rgb::new(100, 50, 25)]).unwrap();
//! let blocky = pixelate(&raster, 2).unwrap();
//! assert_eq!(blocky.pixels(), &[Rgb::new(50, 25, 13), Rgb::new(50, 25, 13)]);
//! ```

mod pixelate;

pub use pixelate::{pixelate, pixelate_to_cells};
