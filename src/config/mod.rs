//! Configuration management for skulabel

pub mod schema;

pub use schema::{BarcodeConfig, CacheConfig, Config, LabelConfig, MatchMode, TableConfig};

use crate::error::{LabelError, LabelResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skulabel")
            .join("config.toml")
    }

    /// Load configuration, using defaults if the file does not exist
    pub async fn load(&self) -> LabelResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> LabelResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| LabelError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| LabelError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> LabelResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            LabelError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    async fn ensure_config_dir(&self) -> LabelResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| LabelError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Ensure the barcode cache directory exists
    ///
    /// A directory that cannot be created is a missing resource: no label
    /// request can succeed without it.
    pub async fn ensure_cache_dir(config: &Config) -> LabelResult<()> {
        let dir = &config.cache.dir;
        if let Err(e) = fs::create_dir_all(dir).await {
            debug!("Creating cache dir {} failed: {}", dir.display(), e);
            return Err(LabelError::ResourceMissing {
                what: "cache directory",
                path: dir.clone(),
            });
        }
        if !dir.is_dir() {
            return Err(LabelError::ResourceMissing {
                what: "cache directory",
                path: dir.clone(),
            });
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}
