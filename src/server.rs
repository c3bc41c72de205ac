//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    http::{header::CACHE_CONTROL, HeaderValue},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::api;
use crate::assets::AssetLoader;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ConvertService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub converter: Arc<ConvertService>,
    pub assets: Arc<AssetLoader>,
}

/// Create application state from an asset loader.
pub fn create_app_state(asset_loader: Arc<AssetLoader>) -> anyhow::Result<AppState> {
    let config = AppConfig::load_from_assets(&asset_loader);
    Ok(create_app_state_with_config(asset_loader, config))
}

/// Create application state with an explicit configuration.
pub fn create_app_state_with_config(asset_loader: Arc<AssetLoader>, config: AppConfig) -> AppState {
    AppState {
        converter: Arc::new(ConvertService::new(Arc::new(config))),
        assets: asset_loader,
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
/// Upload size is capped at `limits.max_upload_bytes`.
pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.converter.config().limits.max_upload_bytes;

    Router::new()
        .route("/", get(handle_index))
        .route(
            "/api/convert",
            post(handle_convert).layer(DefaultBodyLimit::max(upload_limit)),
        )
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Converted images are never cached
        .layer(SetResponseHeaderLayer::if_not_present(
            CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_index(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    api::handle_index(axum::extract::State(state.assets)).await
}

async fn handle_convert(
    axum::extract::State(state): axum::extract::State<AppState>,
    query: Result<
        axum::extract::Query<api::ConvertQuery>,
        axum::extract::rejection::QueryRejection,
    >,
    body: Result<axum::body::Bytes, axum::extract::rejection::BytesRejection>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_convert(axum::extract::State(state.converter), query, body).await
}
