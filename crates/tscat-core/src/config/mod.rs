mod defaults;


use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::TscatError;
use crate::locale;
use defaults::*;

/// Top-level tscat configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Where catalogs come from and which locale to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directories searched for `{file_prefix}{locale}.ts`, in order.
    #[serde(default = "default_search_paths")]
    pub search_paths: Vec<String>,
    /// File name prefix, e.g. `musique_` for `musique_uk.ts`.
    #[serde(default)]
    pub file_prefix: String,
    /// Locale to load. Empty = detect from the environment.
    #[serde(default)]
    pub default_locale: String,
    /// Fall back to catalogs compiled into the binary.
    #[serde(default = "default_true")]
    pub bundled: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_paths: default_search_paths(),
            file_prefix: String::new(),
            default_locale: String::new(),
            bundled: true,
        }
    }
}

impl CatalogConfig {
    /// Search directories with `~` expanded.
    pub fn search_dirs(&self) -> Vec<PathBuf> {
        self.search_paths
            .iter()
            .map(|p| PathBuf::from(shellexpand(p)))
            .collect()
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write logs to this file. Empty = stderr only.
    #[serde(default)]
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

impl Config {
    /// Pick the locale to load: explicit override, then the configured
    /// default, then the environment.
    pub fn resolve_locale(&self, requested: Option<&str>) -> Option<String> {
        if let Some(id) = requested.map(str::trim).filter(|s| !s.is_empty()) {
            return Some(id.to_string());
        }
        let configured = self.catalog.default_locale.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        locale::detect()
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, TscatError> {
    let expanded = shellexpand(path);
    let path = Path::new(&expanded);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TscatError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| TscatError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
