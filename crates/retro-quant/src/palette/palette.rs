//! Palette struct and nearest-color matching.

use std::str::FromStr;

use crate::api::ConvertError;
use crate::color::{squared_distance, Rgb};

/// Largest palette the crate will build or accept.
///
/// Palette indices are stored as `u8`, and 256 colors is the classic
/// 8-bit ceiling.
pub const MAX_PALETTE_SIZE: usize = 256;

/// An ordered set of representative colors.
///
/// The size is fixed at construction. Entries are expected to be distinct,
/// but near-duplicates (or even exact duplicates produced by rounding
/// cluster centers) are permitted; [`Palette::find_nearest`] resolves ties
/// to the lowest index so duplicates are harmless.
///
/// # Example
///
/// ```
/// use retro_quant::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.find_nearest([200.0, 180.0, 190.0]), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidInput`] if `colors` is empty
    /// - [`ConvertError::ResourceExhausted`] if there are more than
    ///   [`MAX_PALETTE_SIZE`] colors
    pub fn new(colors: Vec<Rgb>) -> Result<Self, ConvertError> {
        if colors.is_empty() {
            return Err(ConvertError::invalid("palette cannot be empty"));
        }
        if colors.len() > MAX_PALETTE_SIZE {
            return Err(ConvertError::exhausted(format!(
                "palette has {} colors, maximum is {}",
                colors.len(),
                MAX_PALETTE_SIZE
            )));
        }
        Ok(Self { colors })
    }

    /// Create a palette from hex color strings like `"#FF0000"` or `"#F00"`.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_quant::{Palette, Rgb};
    ///
    /// let palette = Palette::from_hex(&["#000000", "#FFFFFF", "#F00"]).unwrap();
    /// assert_eq!(palette.get(2), Rgb::new(255, 0, 0));
    /// ```
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self, ConvertError> {
        let colors = colors
            .iter()
            .map(|s| Rgb::from_str(s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; empty palettes are rejected at construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= len()`.
    #[inline]
    pub fn get(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Index of the palette color closest to `color`.
    ///
    /// Distance is squared Euclidean in RGB. Ties go to the lowest index.
    /// The input is used as given; callers carrying diffused error clamp it
    /// to `0.0..=255.0` first.
    #[inline]
    pub fn find_nearest(&self, color: [f32; 3]) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::MAX;

        for (i, c) in self.colors.iter().enumerate() {
            let dist = squared_distance(color, c.to_f32());
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }

    /// Index of the palette color closest to an 8-bit pixel.
    ///
    /// Exact integer distances; agrees with [`find_nearest`](Self::find_nearest)
    /// on the same color, ties included.
    pub fn find_nearest_rgb(&self, color: Rgb) -> usize {
        let mut best_idx = 0;
        let mut best_dist = u32::MAX;
        for (i, &c) in self.colors.iter().enumerate() {
            let dist = color.distance_squared(c);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }
        best_idx
    }

    /// The fixed "classic" retro palette.
    ///
    /// Starts with the eight corners of the RGB cube (black, white, red,
    /// green, blue, yellow, magenta, cyan), then fills the remaining slots
    /// from an evenly stepped RGB grid, skipping colors already present.
    /// Sizes below 8 truncate the corner list.
    ///
    /// # Errors
    ///
    /// Same as [`Palette::new`] for `size == 0` or `size > 256`.
    ///
    /// # Example
    ///
    /// ```
    /// use retro_quant::{Palette, Rgb};
    ///
    /// let palette = Palette::classic(16).unwrap();
    /// assert_eq!(palette.len(), 16);
    /// assert_eq!(palette.get(0), Rgb::new(0, 0, 0));
    /// assert_eq!(palette.get(1), Rgb::new(255, 255, 255));
    /// ```
    pub fn classic(size: usize) -> Result<Self, ConvertError> {
        const CORNERS: [Rgb; 8] = [
            Rgb::new(0, 0, 0),
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
            Rgb::new(255, 255, 0),
            Rgb::new(255, 0, 255),
            Rgb::new(0, 255, 255),
        ];

        if size == 0 {
            return Err(ConvertError::invalid("palette cannot be empty"));
        }
        if size > MAX_PALETTE_SIZE {
            return Err(ConvertError::exhausted(format!(
                "palette has {} colors, maximum is {}",
                size, MAX_PALETTE_SIZE
            )));
        }

        let mut colors: Vec<Rgb> = CORNERS.iter().copied().take(size).collect();
        if size > CORNERS.len() {
            // Grid levels per channel, including both 0 and 255, so the grid
            // always has at least (size - 8) colors that are not corners.
            let levels = ((size - CORNERS.len()) as f64).cbrt().ceil() as usize + 2;
            let step = 255.0 / (levels - 1) as f64;
            let level = |i: usize| (i as f64 * step).round() as u8;

            'grid: for ri in 0..levels {
                for gi in 0..levels {
                    for bi in 0..levels {
                        if colors.len() >= size {
                            break 'grid;
                        }
                        let c = Rgb::new(level(ri), level(gi), level(bi));
                        if !colors.contains(&c) {
                            colors.push(c);
                        }
                    }
                }
            }
        }

        Self::new(colors)
    }
}
