pub mod convert;
pub mod index;

pub use convert::{handle_convert, parse_palette, ConvertQuery, __path_handle_convert};
pub use index::{handle_index, __path_handle_index};
