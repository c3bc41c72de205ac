use std::sync::Arc;

use retro_quant::{Algorithm, Palette, PaletteSource, RetroConverter, MAX_PALETTE_SIZE};

use crate::error::RenderError;
use crate::models::AppConfig;
use crate::rendering::{decode_png, encode_indexed_png, DecodeLimits};

/// Smallest palette size accepted from clients.
pub const MIN_PALETTE_SIZE: usize = 2;

/// Per-request overrides. `None` falls back to the configured default.
#[derive(Debug, Clone, Default)]
pub struct ConvertParams {
    pub palette_size: Option<usize>,
    pub dithering: Option<bool>,
    pub seed: Option<u64>,
    pub pixelate: Option<usize>,
    pub algorithm: Option<Algorithm>,
    /// Fixed palette; disables adaptive palette construction
    pub colors: Option<Palette>,
    /// Use the classic fixed retro palette at `palette_size`
    pub classic: bool,
}

/// Encoded result of one conversion
#[derive(Debug)]
pub struct ConvertOutput {
    pub png: Vec<u8>,
    pub width: usize,
    pub height: usize,
    pub colors: usize,
}

/// PNG-to-PNG conversion service combining config defaults with request
/// parameters
#[derive(Clone)]
pub struct ConvertService {
    config: Arc<AppConfig>,
}

impl ConvertService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Merge `params` with the configured defaults and validate the result.
    pub fn build_converter(&self, params: &ConvertParams) -> Result<RetroConverter, RenderError> {
        let defaults = &self.config.conversion;

        if params.classic && params.colors.is_some() {
            return Err(RenderError::InvalidParameter(
                "a fixed palette and the classic palette are mutually exclusive".to_string(),
            ));
        }

        let palette_size = params.palette_size.unwrap_or(defaults.palette_size);
        if params.colors.is_none()
            && !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&palette_size)
        {
            return Err(RenderError::InvalidParameter(format!(
                "palette_size must be between {} and {}, got {}",
                MIN_PALETTE_SIZE, MAX_PALETTE_SIZE, palette_size
            )));
        }

        let source = match (&params.colors, params.classic) {
            (Some(palette), _) => PaletteSource::Fixed(palette.clone()),
            (None, true) => PaletteSource::Classic,
            (None, false) => PaletteSource::Adaptive,
        };

        Ok(RetroConverter::new(palette_size)
            .dithering(params.dithering.unwrap_or(defaults.dithering))
            .seed(params.seed.unwrap_or(defaults.seed))
            .max_iterations(defaults.max_iterations)
            .pixelate(params.pixelate.or(defaults.pixelate))
            .pixelate_cells(defaults.pixelate_cells)
            .algorithm(params.algorithm.unwrap_or(defaults.algorithm.into()))
            .palette(source))
    }

    /// Decode, convert and re-encode a PNG on the current thread.
    pub fn convert_png_blocking(
        &self,
        bytes: &[u8],
        params: &ConvertParams,
    ) -> Result<ConvertOutput, RenderError> {
        let converter = self.build_converter(params)?;
        let limits = DecodeLimits {
            max_width: self.config.limits.max_width,
            max_height: self.config.limits.max_height,
        };

        let raster = decode_png(bytes, Some(limits))?;
        let image = converter.convert(&raster)?;
        let png = encode_indexed_png(&image, self.config.output.optimize)?;

        tracing::info!(
            width = image.width(),
            height = image.height(),
            colors = image.palette().len(),
            input_bytes = bytes.len(),
            output_bytes = png.len(),
            "Converted image"
        );

        Ok(ConvertOutput {
            width: image.width(),
            height: image.height(),
            colors: image.palette().len(),
            png,
        })
    }

    /// Convert on the blocking thread pool
    ///
    /// Uses spawn_blocking to keep k-means and dithering off the async
    /// runtime.
    pub async fn convert_png(
        &self,
        bytes: Vec<u8>,
        params: ConvertParams,
    ) -> Result<ConvertOutput, RenderError> {
        let service = self.clone();

        tokio::task::spawn_blocking(move || service.convert_png_blocking(&bytes, &params))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?
    }
}
