//! Asset loading with embedded fallbacks
//!
//! The default `config.yaml` and the web UI are compiled into the binary.
//!
//! - If `CONFIG_FILE` is NOT set: use the embedded config only (no filesystem access)
//! - If `CONFIG_FILE` IS set and the file is missing: seed it with the embedded default
//! - If `CONFIG_FILE` IS set and the file exists: read it from disk

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Embedded web UI
#[derive(RustEmbed)]
#[folder = "static/"]
struct EmbeddedStatic;

/// Asset loader with optional filesystem override for the config file
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Create a new asset loader
    ///
    /// `config_file` should be `Some` only if `CONFIG_FILE` was set.
    pub fn new(config_file: Option<PathBuf>) -> Self {
        Self { config_file }
    }

    /// Create a loader from the `CONFIG_FILE` environment variable
    pub fn from_env() -> Self {
        Self::new(std::env::var("CONFIG_FILE").ok().map(PathBuf::from))
    }

    /// Read the config file
    ///
    /// Uses the external file when configured and present, otherwise the
    /// embedded default.
    pub fn read_config_string(&self) -> io::Result<String> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return fs::read_to_string(path);
            }
        }

        let data = EmbeddedConfig::get("config.yaml").ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml missing")
        })?;
        tracing::trace!("Loading config from embedded assets");
        String::from_utf8(data.data.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Human-readable description of where the config comes from
    pub fn config_source(&self) -> String {
        match self.config_file {
            Some(ref path) if path.exists() => path.display().to_string(),
            Some(_) => "embedded (file not found)".to_string(),
            None => "embedded".to_string(),
        }
    }

    /// Read an embedded web UI file (e.g. `index.html`)
    pub fn read_static(&self, name: &str) -> Option<Cow<'static, [u8]>> {
        EmbeddedStatic::get(name).map(|f| f.data)
    }

    /// Write the embedded default config to the configured path if it does
    /// not exist yet. Returns `true` when a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        match EmbeddedConfig::get("config.yaml") {
            Some(data) => {
                fs::write(path, &*data.data)?;
                tracing::info!(path = %path.display(), "Seeded config file with embedded default");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// List embedded assets (for display)
    pub fn list_embedded() -> Vec<String> {
        let mut files: Vec<String> = EmbeddedConfig::iter()
            .chain(EmbeddedStatic::iter())
            .map(|s| s.to_string())
            .collect();
        files.sort();
        files
    }
}
