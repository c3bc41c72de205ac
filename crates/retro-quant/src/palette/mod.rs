//! Palette types and construction.
//!
//! A [`Palette`] is an ordered list of at most 256 colors. Palettes come
//! from k-means clustering ([`build_palette`], [`PaletteBuilder`]), from
//! hex strings ([`Palette::from_hex`]), or from the fixed classic retro
//! set ([`Palette::classic`]).

mod error;
mod kmeans;
mod palette;

pub use error::ParseColorError;
pub use kmeans::{build_palette, PaletteBuilder, DEFAULT_MAX_ITERATIONS, MAX_ITERATIONS_LIMIT};
pub use palette::{Palette, MAX_PALETTE_SIZE};
