use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use retro8::api;
use retro8::assets::AssetLoader;
use retro8::models::{AlgorithmName, AppConfig};
use retro8::server;
use retro8::services::{ConvertParams, ConvertService};
use retro_quant::Algorithm;

#[derive(Parser)]
#[command(name = "retro8")]
#[command(about = "Retro8 - turn images into 8-bit style pixel art")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert a PNG file to retro pixel art
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Number of palette colours (2-256)
        #[arg(short, long)]
        palette_size: Option<usize>,

        /// Floyd-Steinberg dithering (`-d`, `-d true`, `-d false`)
        #[arg(short, long, num_args = 0..=1, default_missing_value = "true")]
        dithering: Option<bool>,

        /// Seed for palette initialization
        #[arg(long)]
        seed: Option<u64>,

        /// Pixelation block size applied before quantization
        #[arg(long)]
        pixelate: Option<usize>,

        /// Conversion algorithm: "kmeans-dither" or "simple-pixelate"
        #[arg(long)]
        algorithm: Option<Algorithm>,

        /// Fixed palette as comma-separated hex RGB (e.g. "#000000,#FFFFFF,#FF0000")
        #[arg(long)]
        colors: Option<String>,

        /// Use the classic retro palette
        #[arg(long)]
        classic: bool,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Retro8 API",
        description = "Turn images into 8-bit style pixel art",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(api::handle_index, api::handle_convert),
    components(schemas(AlgorithmName)),
    tags(
        (name = "UI", description = "Browser upload form"),
        (name = "Convert", description = "Image conversion")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Convert {
            input,
            output,
            palette_size,
            dithering,
            seed,
            pixelate,
            algorithm,
            colors,
            classic,
        }) => {
            let colors = colors
                .as_deref()
                .map(api::parse_palette)
                .transpose()
                .map_err(|e| anyhow::anyhow!("{e}"))?;
            let params = ConvertParams {
                palette_size,
                dithering,
                seed,
                pixelate,
                algorithm,
                colors,
                classic,
            };
            run_convert_command(&input, &output, params)
        }
        Some(Commands::Serve) => run_server().await,
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Convert a PNG file directly (no server needed)
fn run_convert_command(input: &Path, output: &Path, params: ConvertParams) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retro8=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let asset_loader = AssetLoader::from_env();
    let config = Arc::new(AppConfig::load_from_assets(&asset_loader));
    let service = ConvertService::new(config);

    let bytes = std::fs::read(input)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", input.display()))?;
    let result = service
        .convert_png_blocking(&bytes, &params)
        .map_err(|e| anyhow::anyhow!("Convert error: {e}"))?;

    std::fs::write(output, &result.png)?;
    println!(
        "Converted {} -> {} ({}x{}, {} colors, {} bytes)",
        input.display(),
        output.display(),
        result.width,
        result.height,
        result.colors,
        result.png.len()
    );

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();

    println!("Retro8 v{VERSION}");
    println!("8-bit style pixel art converter\n");

    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );

    let loader = AssetLoader::from_env();
    println!("\nConfig:  {}", loader.config_source());

    let config = AppConfig::load_from_assets(&loader);
    let conversion = &config.conversion;
    println!("\nDefaults:");
    println!("  palette_size = {}", conversion.palette_size);
    println!("  dithering    = {}", conversion.dithering);
    println!("  seed         = {}", conversion.seed);
    println!(
        "  algorithm    = {}",
        Algorithm::from(conversion.algorithm).as_str()
    );
    println!(
        "  pixelate     = {}",
        conversion
            .pixelate
            .map(|b| b.to_string())
            .unwrap_or_else(|| "off".to_string())
    );
    println!(
        "  limits       = {}x{}, {} byte uploads",
        config.limits.max_width, config.limits.max_height, config.limits.max_upload_bytes
    );

    println!("\nEmbedded assets:");
    for f in AssetLoader::list_embedded() {
        println!("  {f}");
    }

    println!("\nCommands:");
    println!("  retro8 serve     Start the HTTP server");
    println!("  retro8 convert   Convert a PNG file");
    println!("\nRun 'retro8 --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "retro8=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let asset_loader = Arc::new(AssetLoader::from_env());

    tracing::info!(config = %asset_loader.config_source(), "Asset sources configured");

    // Seed if a config path is configured but missing
    if let Err(e) = asset_loader.seed_if_configured() {
        tracing::warn!(%e, "Failed to seed config file");
    }

    let state = server::create_app_state(asset_loader)?;

    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Retro8 server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
