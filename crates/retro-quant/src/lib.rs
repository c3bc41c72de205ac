#![allow(clippy::module_inception)]

//! retro-quant: 8-bit style color quantization and dithering
//!
//! Converts an RGB raster into a retro-looking image with a small palette:
//! an adaptive palette is derived with k-means, then each pixel is mapped to
//! it either directly or with Floyd-Steinberg error diffusion. An optional
//! block pixelation pre-pass gives the chunky low-resolution look.
//!
//! # Quick Start
//!
//! ```
//! use retro_quant::{convert_to_retro, Raster, Rgb};
//!
//! let pixels: Vec<Rgb> = (0..16 * 16)
//!     .map(|i| Rgb::new((i % 256) as u8, 128, (255 - i % 256) as u8))
//!     .collect();
//! let raster = Raster::new(16, 16, pixels).unwrap();
//!
//! let retro = convert_to_retro(&raster, 8, true, 42).unwrap();
//! assert_eq!((retro.width(), retro.height()), (16, 16));
//! ```
//!
//! # Builder API
//!
//! [`RetroConverter`] exposes every knob and returns a [`RetroImage`] that
//! keeps palette indices, which is what indexed image encoders want:
//!
//! ```
//! use retro_quant::{Algorithm, PaletteSource, RetroConverter, Raster, Rgb};
//!
//! let raster = Raster::new(4, 4, vec![Rgb::new(90, 120, 200); 16]).unwrap();
//! let image = RetroConverter::new(16)
//!     .algorithm(Algorithm::SimplePixelate)
//!     .palette(PaletteSource::Classic)
//!     .convert(&raster)
//!     .unwrap();
//! assert_eq!(image.palette().len(), 16);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! Raster
//!   |
//!   +--> [pixelate]          block means, optional
//!   |
//!   +--> build_palette       k-means++ seeded by StdRng, Lloyd iterations
//!   |
//!   +--> dither_indices      Floyd-Steinberg, raster order
//!   |    or quantize         nearest color, no diffusion
//!   v
//! RetroImage (indices + palette)
//! ```
//!
//! # Color Distance
//!
//! All matching uses squared Euclidean distance over raw 8-bit RGB
//! channels, with ties resolved to the lowest palette index. Error diffusion
//! runs in the same space: the accumulator holds unclamped `f32` channel
//! values, and only the nearest-color lookup sees a copy clamped to
//! `0..=255`.
//!
//! # Determinism
//!
//! Every operation is a pure function of its inputs. Palette construction
//! is driven by an explicit seed, so a `(raster, palette_size, seed)` triple
//! always produces the same output.

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;
pub mod preprocess;
mod quantize;
mod raster;

#[cfg(test)]
mod domain_tests;

pub use api::{
    convert_to_retro, Algorithm, ConvertError, PaletteSource, RetroConverter,
    DEFAULT_PIXELATE_CELLS,
};
pub use color::Rgb;
pub use dither::{dither, dither_indices, ErrorAccumulator, Kernel, FLOYD_STEINBERG};
pub use output::{LabelMap, RetroImage};
pub use palette::{
    build_palette, Palette, PaletteBuilder, ParseColorError, DEFAULT_MAX_ITERATIONS,
    MAX_ITERATIONS_LIMIT, MAX_PALETTE_SIZE,
};
pub use preprocess::{pixelate, pixelate_to_cells};
pub use quantize::quantize;
pub use raster::{Raster, MAX_PIXELS};
