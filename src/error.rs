use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use retro_quant::ConvertError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Image too large: {width}x{height} (max {max_width}x{max_height})")]
    ImageTooLarge {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Conversion task failed: {0}")]
    Task(String),
}

impl RenderError {
    /// HTTP status for this error when it reaches a client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RenderError::PngDecode(_) | RenderError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            RenderError::ImageTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            RenderError::Convert(ConvertError::ResourceExhausted(_)) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            RenderError::Convert(_) => StatusCode::BAD_REQUEST,
            RenderError::PngEncode(_) | RenderError::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            ApiError::Render(e) => (e.status_code(), e.to_string()),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "Request failed");
        } else {
            tracing::debug!(%status, error = %message, "Request rejected");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
        }));

        (status, body).into_response()
    }
}
