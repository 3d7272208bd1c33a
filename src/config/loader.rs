use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::settings::AppSettings;
use crate::config::types::ContainerConfig;
use crate::gpu::VkVersion;

/// Errors that can occur when loading or saving configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl AppSettings {
    /// Returns the path to the settings file.
    ///
    /// Uses `~/.config/containerconf/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("containerconf").join("config.toml")
    }

    /// Loads settings from the default settings file.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Loads settings from `path`.
    ///
    /// - If the file doesn't exist, returns `AppSettings::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(AppSettings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let settings: AppSettings = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validates the settings.
    ///
    /// Checks:
    /// - The Vulkan API version parses as MAJOR.MINOR[.PATCH]
    /// - At least one GPU card is configured
    /// - A configured CPU count is non-zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(err) = self.gpu.vk_api_version.parse::<VkVersion>() {
            return Err(ConfigError::ValidationError {
                message: err.to_string(),
            });
        }

        if self.gpu.cards.is_empty() {
            return Err(ConfigError::ValidationError {
                message: "At least one GPU card must be configured".to_string(),
            });
        }

        if self.host.cpu_count == Some(0) {
            return Err(ConfigError::ValidationError {
                message: "host.cpu_count must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

impl ContainerConfig {
    /// Loads a container record from `path`. A missing file yields the
    /// default record.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No container file at {}, starting from defaults", path.display());
            return Ok(ContainerConfig::default());
        }

        let read_err = |source: std::io::Error| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        };
        let mut file = File::open(path).map_err(read_err)?;
        FileExt::lock_shared(&file).map_err(read_err)?;
        let mut content = String::new();
        let result = file.read_to_string(&mut content);
        let _ = FileExt::unlock(&file);
        result.map_err(read_err)?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Writes the record to `path`, creating parent directories.
    ///
    /// The file is held under an exclusive advisory lock while it is
    /// rewritten. Readers going through [`ContainerConfig::load_from`] take
    /// the shared lock, so they never see a partial record.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        let write_err = |source: std::io::Error| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)
            .map_err(write_err)?;
        file.lock_exclusive().map_err(write_err)?;
        let result = file
            .set_len(0)
            .and_then(|_| file.write_all(content.as_bytes()))
            .and_then(|_| file.sync_all());
        let _ = FileExt::unlock(&file);
        result.map_err(write_err)?;

        tracing::debug!("Saved container '{}' to {}", self.name, path.display());
        Ok(())
    }
}
