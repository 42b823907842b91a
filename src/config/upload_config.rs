use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use log::{debug, info};
use serde::{Serialize, Deserialize};

use crate::constants::{
    DEFAULT_CONFIG_NAME, DEFAULT_CONTENT_TYPE, DEFAULT_EXTENSION, DEFAULT_NAMESPACE,
    DEFAULT_PART_SIZE, JOB_QUEUE_CAPACITY, S3_MIN_PART_SIZE,
};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UploadConfig {
    /// Destination bucket, required before any upload can run
    #[serde(default)]
    pub bucket: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub profile: Option<String>,
    /// Part size in megabytes; values below the S3 minimum are clamped up
    #[serde(default = "default_part_size_mb")]
    pub part_size_mb: usize,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default = "default_content_type")]
    pub content_type: String,
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

fn default_part_size_mb() -> usize {
    DEFAULT_PART_SIZE / (1024 * 1024)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

fn default_queue_capacity() -> usize {
    JOB_QUEUE_CAPACITY
}

impl Default for UploadConfig {
    fn default() -> Self {
        UploadConfig {
            bucket: String::new(),
            namespace: default_namespace(),
            region: None,
            profile: None,
            part_size_mb: default_part_size_mb(),
            extension: default_extension(),
            content_type: default_content_type(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

impl UploadConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: UploadConfig = serde_yaml::from_str(&content)
            .context("Failed to parse YAML config")?;

        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_yaml_file(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config to YAML")?;

        fs::write(path, yaml)
            .context(format!("Failed to write config to {}", path.display()))?;

        info!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// Create a default configuration YAML file
    pub fn create_default_config_file(path: &Path) -> Result<()> {
        let default_config = UploadConfig::default();
        default_config.save_to_yaml_file(path)
    }

    /// Effective part size in bytes, clamped to the S3 minimum
    pub fn effective_part_size(&self) -> usize {
        (self.part_size_mb * 1024 * 1024).max(S3_MIN_PART_SIZE)
    }

    /// Check that everything an upload run needs is present
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(anyhow!(
                "No destination bucket configured; set it in the config file, \
                 with --bucket, or via RESTREAM_BUCKET"
            ));
        }
        Ok(())
    }
}

/// Load a configuration file or create a default one.
///
/// This function attempts to load a configuration in the following order:
/// 1. From the specified path if provided and exists
/// 2. If a path was provided but does not exist, a default config is
///    written there and returned
/// 3. From `config.yaml` in the working directory if present
/// 4. Built-in defaults otherwise
///
/// # Arguments
///
/// * `config_path` - Optional path to a configuration file
///
/// # Returns
///
/// * `Ok(UploadConfig)` - The loaded or created configuration
/// * `Err` - If a config file exists but cannot be parsed
pub fn load_or_create_config(config_path: Option<&Path>) -> Result<UploadConfig> {
    match config_path {
        Some(path) => {
            if path.exists() {
                UploadConfig::from_yaml_file(path)
            } else {
                info!("Creating default config at {}", path.display());
                let default_config = UploadConfig::default();
                default_config.save_to_yaml_file(path)?;
                Ok(default_config)
            }
        }
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_NAME);
            if default_path.exists() {
                info!("Using config file: {}", default_path.display());
                UploadConfig::from_yaml_file(default_path)
            } else {
                debug!("No config file found, using defaults");
                Ok(UploadConfig::default())
            }
        }
    }
}
