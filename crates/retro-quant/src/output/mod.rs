//! Output types for quantization and dithering.
//!
//! - [`LabelMap`]: one palette index per pixel, the result of
//!   [`quantize`](crate::quantize()) and [`dither_indices`](crate::dither_indices)
//! - [`RetroImage`]: a label map bundled with the palette it indexes, the
//!   result of [`RetroConverter::convert`](crate::RetroConverter::convert)

mod label_map;
mod retro_image;

pub use label_map::LabelMap;
pub use retro_image::RetroImage;
