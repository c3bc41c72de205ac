//! RetroConverter builder -- the configurable entry point for the crate.
//!
//! [`RetroConverter`] fixes the whole pipeline up front: which
//! [`Algorithm`] runs, where the palette comes from, and the pixelation and
//! clustering parameters. Nothing is substituted at run time; a failing
//! conversion reports its error instead of trying another strategy.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use super::ConvertError;
use crate::dither::dither_indices;
use crate::output::RetroImage;
use crate::palette::{Palette, PaletteBuilder, DEFAULT_MAX_ITERATIONS, MAX_PALETTE_SIZE};
use crate::preprocess::{pixelate, pixelate_to_cells};
use crate::quantize::quantize;
use crate::raster::Raster;

/// Default number of blocks along the longer side for
/// [`Algorithm::SimplePixelate`].
pub const DEFAULT_PIXELATE_CELLS: usize = 64;

/// Conversion strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Optional pixelation with an explicit block size, then palette
    /// construction, then Floyd-Steinberg dithering (or plain quantization
    /// when dithering is off).
    #[default]
    KMeansDither,

    /// Pixelate to a fixed cell grid, build the palette, quantize without
    /// dithering. Ignores the dithering flag and the explicit block size.
    SimplePixelate,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::KMeansDither => "kmeans-dither",
            Algorithm::SimplePixelate => "simple-pixelate",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = ConvertError;

    /// Parse `kmeans-dither` or `simple-pixelate`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("kmeans-dither") {
            Ok(Algorithm::KMeansDither)
        } else if s.eq_ignore_ascii_case("simple-pixelate") {
            Ok(Algorithm::SimplePixelate)
        } else {
            Err(ConvertError::invalid(format!(
                "unknown algorithm '{}', expected kmeans-dither or simple-pixelate",
                s
            )))
        }
    }
}

/// Where the palette comes from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaletteSource {
    /// K-means clustering of the (possibly pixelated) input.
    #[default]
    Adaptive,
    /// A caller-supplied palette. The converter's palette size is ignored.
    Fixed(Palette),
    /// [`Palette::classic`] at the converter's palette size.
    Classic,
}

/// High-level conversion builder.
///
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   reused across images and shared between threads
///
/// # Example
///
/// ```
/// use retro_quant::{Algorithm, RetroConverter, Raster, Rgb};
///
/// let pixels: Vec<Rgb> = (0..64).map(|i| Rgb::new(i * 4, 255 - i * 4, 128)).collect();
/// let raster = Raster::new(8, 8, pixels).unwrap();
///
/// let converter = RetroConverter::new(4)
///     .seed(7)
///     .pixelate(Some(2))
///     .algorithm(Algorithm::KMeansDither);
///
/// let image = converter.convert(&raster).unwrap();
/// assert_eq!((image.width(), image.height()), (8, 8));
/// assert!(image.palette().len() <= 4);
/// ```
#[derive(Debug, Clone)]
pub struct RetroConverter {
    palette_size: usize,
    dithering: bool,
    seed: u64,
    max_iterations: usize,
    pixelate: Option<usize>,
    pixelate_cells: usize,
    algorithm: Algorithm,
    palette: PaletteSource,
}

impl RetroConverter {
    /// Create a converter targeting `palette_size` colors.
    ///
    /// Defaults: dithering on, seed 0, 32 k-means iterations, no
    /// pixelation, [`Algorithm::KMeansDither`], [`PaletteSource::Adaptive`].
    pub fn new(palette_size: usize) -> Self {
        Self {
            palette_size,
            dithering: true,
            seed: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            pixelate: None,
            pixelate_cells: DEFAULT_PIXELATE_CELLS,
            algorithm: Algorithm::default(),
            palette: PaletteSource::default(),
        }
    }

    #[inline]
    pub fn dithering(mut self, enabled: bool) -> Self {
        self.dithering = enabled;
        self
    }

    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the k-means iteration cap (1..=100).
    #[inline]
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Pixelation block size for [`Algorithm::KMeansDither`]. `None` or
    /// `Some(1)` disables the pre-pass.
    #[inline]
    pub fn pixelate(mut self, block_size: Option<usize>) -> Self {
        self.pixelate = block_size;
        self
    }

    /// Cells along the longer side for [`Algorithm::SimplePixelate`].
    #[inline]
    pub fn pixelate_cells(mut self, cells: usize) -> Self {
        self.pixelate_cells = cells;
        self
    }

    #[inline]
    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    #[inline]
    pub fn palette(mut self, source: PaletteSource) -> Self {
        self.palette = source;
        self
    }

    /// Run the configured pipeline on `raster`.
    ///
    /// # Errors
    ///
    /// - [`ConvertError::InvalidInput`] for a zero palette size (adaptive
    ///   and classic palettes), a zero block size or cell count, or an
    ///   iteration cap outside 1..=100
    /// - [`ConvertError::ResourceExhausted`] for a palette size above 256
    pub fn convert(&self, raster: &Raster) -> Result<RetroImage, ConvertError> {
        if !matches!(self.palette, PaletteSource::Fixed(_)) {
            check_palette_size(self.palette_size)?;
        }

        let prepared: Cow<'_, Raster> = match self.algorithm {
            Algorithm::KMeansDither => match self.pixelate {
                Some(block) => Cow::Owned(pixelate(raster, block)?),
                None => Cow::Borrowed(raster),
            },
            Algorithm::SimplePixelate => Cow::Owned(pixelate_to_cells(raster, self.pixelate_cells)?),
        };

        let palette = match &self.palette {
            PaletteSource::Adaptive => PaletteBuilder::new(self.palette_size)
                .seed(self.seed)
                .max_iterations(self.max_iterations)
                .build(prepared.pixels())?,
            PaletteSource::Fixed(palette) => palette.clone(),
            PaletteSource::Classic => Palette::classic(self.palette_size)?,
        };

        let dither = self.dithering && self.algorithm == Algorithm::KMeansDither;
        let labels = if dither {
            dither_indices(&prepared, &palette)?
        } else {
            quantize(&prepared, &palette)
        };

        tracing::debug!(
            algorithm = %self.algorithm,
            width = raster.width(),
            height = raster.height(),
            colors = palette.len(),
            dithered = dither,
            "Converted raster"
        );

        RetroImage::new(labels, palette)
    }
}

fn check_palette_size(size: usize) -> Result<(), ConvertError> {
    if size == 0 {
        return Err(ConvertError::invalid("palette size must be at least 1"));
    }
    if size > MAX_PALETTE_SIZE {
        return Err(ConvertError::exhausted(format!(
            "palette size {} exceeds maximum of {}",
            size, MAX_PALETTE_SIZE
        )));
    }
    Ok(())
}
