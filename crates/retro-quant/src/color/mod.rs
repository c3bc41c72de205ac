//! Color types.
//!
//! Everything in this crate works in plain 8-bit RGB space. [`Rgb`] is the
//! pixel type for input, palettes and output; floating-point `[f32; 3]`
//! triples are used only where error must be carried between pixels.

mod rgb;

pub(crate) use rgb::squared_distance;
pub use rgb::Rgb;
