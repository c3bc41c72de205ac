use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Query, State,
    },
    http::{header, HeaderName, StatusCode},
    response::{IntoResponse, Response},
};
use retro_quant::Palette;
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::error::ApiError;
use crate::models::AlgorithmName;
use crate::services::{ConvertParams, ConvertService};

/// Number of colours in the returned palette
pub const PALETTE_COLORS_HEADER: HeaderName = HeaderName::from_static("x-palette-colors");

/// Query parameters for the convert endpoint
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Number of palette colours (2..=256)
    pub palette_size: Option<usize>,
    /// Floyd-Steinberg error diffusion
    pub dithering: Option<bool>,
    /// Seed for palette initialization
    pub seed: Option<u64>,
    /// Pixelation block size applied before quantization
    pub pixelate: Option<usize>,
    /// Conversion algorithm
    #[param(inline)]
    pub algorithm: Option<AlgorithmName>,
    /// Fixed palette as comma-separated hex colours (e.g. `#000000,#ffffff`)
    pub palette: Option<String>,
    /// Use the classic retro palette instead of an adaptive one
    pub classic: Option<bool>,
}

impl ConvertQuery {
    pub fn to_convert_params(&self) -> Result<ConvertParams, ApiError> {
        let colors = self
            .palette
            .as_deref()
            .map(parse_palette)
            .transpose()?;

        Ok(ConvertParams {
            palette_size: self.palette_size,
            dithering: self.dithering,
            seed: self.seed,
            pixelate: self.pixelate,
            algorithm: self.algorithm.map(Into::into),
            colors,
            classic: self.classic.unwrap_or(false),
        })
    }
}

/// Parse a comma-separated list of hex colours into a fixed palette.
pub fn parse_palette(list: &str) -> Result<Palette, ApiError> {
    let colors: Vec<&str> = list
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    Palette::from_hex(&colors).map_err(|e| ApiError::BadRequest(format!("palette: {e}")))
}

/// Convert a PNG to retro pixel art
///
/// The request body is the raw PNG file. Parameters left out fall back to
/// the server configuration.
#[utoipa::path(
    post,
    path = "/api/convert",
    request_body(content = Vec<u8>, content_type = "image/png", description = "PNG image"),
    params(ConvertQuery),
    responses(
        (status = 200, description = "Converted image", content_type = "image/png",
            headers(("X-Palette-Colors" = usize, description = "Colours in the output palette"))),
        (status = 400, description = "Invalid image or parameter"),
        (status = 413, description = "Upload or image dimensions over the configured limits"),
        (status = 500, description = "Conversion failed"),
    ),
    tag = "Convert"
)]
pub async fn handle_convert(
    State(service): State<Arc<ConvertService>>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let body = body.map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(e.body_text())
        } else {
            ApiError::BadRequest(e.body_text())
        }
    })?;

    if body.is_empty() {
        return Err(ApiError::BadRequest("request body is empty".to_string()));
    }

    let params = query.to_convert_params()?;
    tracing::debug!(bytes = body.len(), ?params, "Convert request");

    let output = service.convert_png(body.to_vec(), params).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, output.png.len().to_string()),
            (PALETTE_COLORS_HEADER, output.colors.to_string()),
        ],
        output.png,
    )
        .into_response())
}
