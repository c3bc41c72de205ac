//! 8-bit RGB pixel type.

use std::fmt;
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Squared Euclidean distance between two channel triples.
///
/// The single distance rule shared by palette lookup (`f32`, `i32`) and
/// clustering (`f64`).
#[inline]
pub(crate) fn squared_distance<T>(a: [T; 3], b: [T; 3]) -> T
where
    T: Copy + Add<Output = T> + Sub<Output = T> + Mul<Output = T>,
{
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}

/// A pixel in 8-bit RGB space.
///
/// Treated as a point in 3-D color space for distance computations.
/// All distances in this crate are squared Euclidean distances over the
/// raw channel values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a new color from channel values.
    ///
    /// # Example
    /// ```
    /// use retro_quant::Rgb;
    /// let red = Rgb::new(255, 0, 0);
    /// assert_eq!(red.r, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Channel values as floats, for error arithmetic.
    #[inline]
    pub fn to_f32(self) -> [f32; 3] {
        [self.r as f32, self.g as f32, self.b as f32]
    }

    /// Build a color from float channels, rounding to the nearest integer
    /// and clamping to `0..=255`.
    ///
    /// # Example
    /// ```
    /// use retro_quant::Rgb;
    /// assert_eq!(Rgb::from_f64_rounded([-3.0, 127.5, 300.0]), Rgb::new(0, 128, 255));
    /// ```
    #[inline]
    pub fn from_f64_rounded(channels: [f64; 3]) -> Self {
        let q = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(q(channels[0]), q(channels[1]), q(channels[2]))
    }

    /// Squared Euclidean distance to another color.
    #[inline]
    pub fn distance_squared(self, other: Rgb) -> u32 {
        let widen = |c: Rgb| [c.r as i32, c.g as i32, c.b as i32];
        squared_distance(widen(self), widen(other)) as u32
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(bytes: [u8; 3]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// with surrounding whitespace trimmed.
    ///
    /// ```
    /// use retro_quant::Rgb;
    ///
    /// let white: Rgb = "#FFFFFF".parse().unwrap();
    /// assert_eq!(white, Rgb::new(255, 255, 255));
    ///
    /// let red: Rgb = "#F00".parse().unwrap();
    /// assert_eq!(red, Rgb::new(255, 0, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: 0xF -> 0xFF
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::new(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::new(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}
