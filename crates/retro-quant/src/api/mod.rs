//! Public API for the retro-quant crate.
//!
//! This module provides the high-level API: the [`RetroConverter`] builder,
//! the one-call [`convert_to_retro`] entry point, and the [`ConvertError`]
//! unified error type.

mod builder;
mod convert;
mod error;

pub use builder::{Algorithm, PaletteSource, RetroConverter, DEFAULT_PIXELATE_CELLS};
pub use convert::convert_to_retro;
pub use error::ConvertError;
