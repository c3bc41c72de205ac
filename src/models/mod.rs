pub mod config;

pub use config::{AlgorithmName, AppConfig, ConversionConfig, LimitsConfig, OutputConfig};
