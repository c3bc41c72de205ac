use axum::{extract::State, response::Html};
use std::borrow::Cow;
use std::sync::Arc;

use crate::assets::AssetLoader;
use crate::error::ApiError;

/// Upload form
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "HTML upload form", content_type = "text/html"),
    ),
    tag = "UI"
)]
pub async fn handle_index(
    State(assets): State<Arc<AssetLoader>>,
) -> Result<Html<Cow<'static, [u8]>>, ApiError> {
    assets
        .read_static("index.html")
        .map(Html)
        .ok_or_else(|| ApiError::Internal("embedded index.html missing".to_string()))
}
