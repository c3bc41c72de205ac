use crate::assets::AssetLoader;
use crate::services::MIN_PALETTE_SIZE;
use retro_quant::{Algorithm, MAX_ITERATIONS_LIMIT, MAX_PALETTE_SIZE};
use serde::Deserialize;
use utoipa::ToSchema;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Default conversion parameters
    pub conversion: ConversionConfig,

    /// Upload and image size limits
    pub limits: LimitsConfig,

    /// PNG output settings
    pub output: OutputConfig,
}

/// Conversion algorithm as written in config files and query strings
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmName {
    /// k-means palette, optional pixelation, Floyd-Steinberg dithering
    #[default]
    KmeansDither,
    /// Pixelate to a fixed grid, adaptive palette, no dithering
    SimplePixelate,
}

impl From<AlgorithmName> for Algorithm {
    fn from(name: AlgorithmName) -> Self {
        match name {
            AlgorithmName::KmeansDither => Algorithm::KMeansDither,
            AlgorithmName::SimplePixelate => Algorithm::SimplePixelate,
        }
    }
}

/// Defaults applied when a request or CLI call leaves a parameter out
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConversionConfig {
    pub palette_size: usize,
    pub dithering: bool,
    pub seed: u64,
    pub max_iterations: usize,
    pub algorithm: AlgorithmName,
    /// Block size for the kmeans-dither pixelation pre-pass
    pub pixelate: Option<usize>,
    /// Blocks along the longer side for simple-pixelate
    pub pixelate_cells: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            palette_size: 64,
            dithering: true,
            seed: 42,
            max_iterations: retro_quant::DEFAULT_MAX_ITERATIONS,
            algorithm: AlgorithmName::default(),
            pixelate: None,
            pixelate_cells: retro_quant::DEFAULT_PIXELATE_CELLS,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_width: 4096,
            max_height: 4096,
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputConfig {
    /// Recompress PNG output with oxipng
    pub optimize: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { optimize: true }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    let config = config.validated();
                    tracing::info!(
                        palette_size = config.conversion.palette_size,
                        dithering = config.conversion.dithering,
                        algorithm = ?config.conversion.algorithm,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults, warning for each.
    pub fn validated(mut self) -> Self {
        let conv_defaults = ConversionConfig::default();
        let limit_defaults = LimitsConfig::default();
        let conv = &mut self.conversion;

        if !(MIN_PALETTE_SIZE..=MAX_PALETTE_SIZE).contains(&conv.palette_size) {
            tracing::warn!(
                value = conv.palette_size,
                default = conv_defaults.palette_size,
                "conversion.palette_size out of range, using default"
            );
            conv.palette_size = conv_defaults.palette_size;
        }
        if !(1..=MAX_ITERATIONS_LIMIT).contains(&conv.max_iterations) {
            tracing::warn!(
                value = conv.max_iterations,
                default = conv_defaults.max_iterations,
                "conversion.max_iterations out of range, using default"
            );
            conv.max_iterations = conv_defaults.max_iterations;
        }
        if conv.pixelate_cells == 0 {
            tracing::warn!(
                default = conv_defaults.pixelate_cells,
                "conversion.pixelate_cells must be positive, using default"
            );
            conv.pixelate_cells = conv_defaults.pixelate_cells;
        }
        if conv.pixelate == Some(0) {
            tracing::warn!("conversion.pixelate must be positive, disabling pixelation");
            conv.pixelate = None;
        }

        let limits = &mut self.limits;
        if limits.max_width == 0 {
            tracing::warn!("limits.max_width must be positive, using default");
            limits.max_width = limit_defaults.max_width;
        }
        if limits.max_height == 0 {
            tracing::warn!("limits.max_height must be positive, using default");
            limits.max_height = limit_defaults.max_height;
        }
        if limits.max_upload_bytes == 0 {
            tracing::warn!("limits.max_upload_bytes must be positive, using default");
            limits.max_upload_bytes = limit_defaults.max_upload_bytes;
        }

        self
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
