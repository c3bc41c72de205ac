pub mod converter;

pub use converter::{ConvertOutput, ConvertParams, ConvertService, MIN_PALETTE_SIZE};
