//! Tests for the /api/convert endpoint.

mod common;

use axum::http::StatusCode;
use common::{fixtures, TestApp};
use pretty_assertions::assert_eq;
use retro8::models::AppConfig;

#[tokio::test]
async fn test_convert_returns_png_with_same_dimensions() {
    let app = TestApp::new();

    let response = app.convert("", fixtures::gradient_png(32, 24)).await;

    common::assert_png(&response);
    let (width, height, rgb) = fixtures::decode_rgb(&response.body);
    assert_eq!((width, height), (32, 24));

    let colors: usize = response
        .header("x-palette-colors")
        .and_then(|v| v.parse().ok())
        .expect("X-Palette-Colors header");
    assert!(colors <= 64);
    assert!(fixtures::distinct_colors(&rgb) <= colors);
}

#[tokio::test]
async fn test_convert_limits_palette_size() {
    let app = TestApp::new();

    let response = app
        .convert("palette_size=4&seed=3", fixtures::gradient_png(40, 40))
        .await;

    common::assert_png(&response);
    let (_, _, rgb) = fixtures::decode_rgb(&response.body);
    assert!(fixtures::distinct_colors(&rgb) <= 4);
    assert_eq!(response.header("x-palette-colors"), Some("4"));
}

#[tokio::test]
async fn test_convert_is_deterministic_for_seed() {
    let app = TestApp::new();
    let query = "palette_size=8&seed=11&dithering=true";

    let first = app.convert(query, fixtures::gradient_png(24, 24)).await;
    let second = app.convert(query, fixtures::gradient_png(24, 24)).await;

    common::assert_png(&first);
    assert_eq!(first.body, second.body);
}

#[tokio::test]
async fn test_convert_fixed_palette_round_trips_checkerboard() {
    let app = TestApp::new();

    let response = app
        .convert(
            "palette=%23000000,%23ffffff",
            fixtures::checkerboard_png(9, 7),
        )
        .await;

    common::assert_png(&response);
    assert_eq!(response.header("x-palette-colors"), Some("2"));
    let (_, _, rgb) = fixtures::decode_rgb(&response.body);
    let (_, _, original) = fixtures::decode_rgb(&fixtures::checkerboard_png(9, 7));
    assert_eq!(rgb, original);
}

#[tokio::test]
async fn test_convert_classic_palette() {
    let app = TestApp::new();

    let response = app
        .convert(
            "classic=true&palette_size=8&dithering=false",
            fixtures::gradient_png(16, 16),
        )
        .await;

    common::assert_png(&response);
    let (_, _, rgb) = fixtures::decode_rgb(&response.body);
    for px in rgb.chunks_exact(3) {
        assert!(
            px.iter().all(|&c| c == 0 || c == 255),
            "{px:?} is not a cube corner"
        );
    }
}

#[tokio::test]
async fn test_convert_simple_pixelate() {
    let app = TestApp::new();

    let response = app
        .convert(
            "algorithm=simple-pixelate&palette_size=16",
            fixtures::gradient_png(130, 20),
        )
        .await;

    common::assert_png(&response);
    let (width, height, _) = fixtures::decode_rgb(&response.body);
    assert_eq!((width, height), (130, 20));
}

#[tokio::test]
async fn test_convert_accepts_rgba() {
    let app = TestApp::new();
    let data: Vec<u8> = (0..8 * 8).flat_map(|i| [i as u8 * 4, 0, 0, 128]).collect();
    let png = fixtures::encode_png(8, 8, png::ColorType::Rgba, &data);

    let response = app.convert("palette_size=2", png).await;

    common::assert_png(&response);
}

#[tokio::test]
async fn test_convert_rejects_invalid_png() {
    let app = TestApp::new();

    let response = app.convert("", b"definitely not a png".to_vec()).await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_rejects_empty_body() {
    let app = TestApp::new();

    let response = app.convert("", Vec::new()).await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_rejects_bad_palette_size() {
    let app = TestApp::new();

    for size in ["0", "1", "257"] {
        let response = app
            .convert(&format!("palette_size={size}"), fixtures::gradient_png(8, 8))
            .await;
        common::assert_json_error(&response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_convert_rejects_unknown_algorithm() {
    let app = TestApp::new();

    let response = app
        .convert("algorithm=median-cut", fixtures::gradient_png(8, 8))
        .await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_rejects_bad_palette() {
    let app = TestApp::new();

    let response = app
        .convert("palette=%23000000,zzz", fixtures::gradient_png(8, 8))
        .await;
    common::assert_json_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .convert(
            "palette=%23000000&classic=true",
            fixtures::gradient_png(8, 8),
        )
        .await;
    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_rejects_zero_pixelate() {
    let app = TestApp::new();

    let response = app.convert("pixelate=0", fixtures::gradient_png(8, 8)).await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_convert_rejects_oversize_image() {
    let mut config = AppConfig::default();
    config.limits.max_width = 16;
    config.limits.max_height = 16;
    let app = TestApp::with_config(config);

    let response = app.convert("", fixtures::gradient_png(17, 4)).await;

    common::assert_json_error(&response, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_convert_rejects_oversize_upload() {
    let mut config = AppConfig::default();
    config.limits.max_upload_bytes = 64;
    let app = TestApp::with_config(config);

    let png = fixtures::gradient_png(64, 64);
    assert!(png.len() > 64);
    let response = app.convert("", png).await;

    common::assert_json_error(&response, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_convert_response_not_cached() {
    let app = TestApp::new();

    let response = app.convert("", fixtures::gradient_png(4, 4)).await;

    common::assert_png(&response);
    assert_eq!(response.header("cache-control"), Some("no-store"));
}
