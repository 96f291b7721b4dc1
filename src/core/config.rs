use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub portal: PortalConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_backend")]
    pub backend: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    #[serde(default = "default_seed_on_start")]
    pub seed_on_start: bool,
    #[serde(default = "default_root_admin_id")]
    pub root_admin_id: String,
    #[serde(default = "default_good_standing_threshold")]
    pub good_standing_threshold: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            data_dir: default_data_dir(),
        }
    }
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            seed_on_start: default_seed_on_start(),
            root_admin_id: default_root_admin_id(),
            good_standing_threshold: default_good_standing_threshold(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_backend() -> String {
    "memory".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("portal-data")
}

fn default_seed_on_start() -> bool {
    true
}

fn default_root_admin_id() -> String {
    "1".to_string()
}

fn default_good_standing_threshold() -> u32 {
    75
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_backends = ["memory", "file"];
        if !valid_backends.contains(&self.storage.backend.as_str()) {
            bail!(
                "Invalid storage backend '{}'. Must be one of: memory, file",
                self.storage.backend
            );
        }

        if self.storage.backend == "file" && self.storage.data_dir.as_os_str().is_empty() {
            bail!("data_dir must not be empty when using the file backend");
        }

        if self.portal.root_admin_id.trim().is_empty() {
            bail!("root_admin_id must not be empty");
        }

        if self.portal.good_standing_threshold > 100 {
            bail!(
                "good_standing_threshold ({}) must be between 0 and 100",
                self.portal.good_standing_threshold
            );
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
