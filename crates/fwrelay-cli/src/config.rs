//! Configuration file handling for fwrelay-cli

use anyhow::{Context, Result};
use clap::ValueEnum;
use fwrelay_client::VendorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Configuration for the CLI tool
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Default output format
    pub output: Option<String>,
    /// Disable colored output
    pub no_color: Option<bool>,
    /// Vendor endpoints, same table as the daemon's config file
    #[serde(default)]
    pub vendor: VendorConfig,
}

impl Config {
    /// Load configuration from the default config file
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Get the default config file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("fwrelay");

        Ok(config_dir.join("config.toml"))
    }

    /// Merge CLI arguments over config file values
    pub fn merge_with_args(
        &self,
        vendor_base: Option<&str>,
        timeout_secs: Option<u64>,
        output: Option<OutputFormat>,
        no_color: bool,
    ) -> Result<MergedConfig> {
        let mut vendor = self.vendor.clone();
        if let Some(base) = vendor_base {
            let stub = VendorConfig::with_base_url(base);
            vendor.info_url = stub.info_url;
            vendor.flash_url = stub.flash_url;
            vendor.ota_url = stub.ota_url;
        }
        if timeout_secs.is_some() {
            vendor.request_timeout_secs = timeout_secs;
        }

        let output = match (output, self.output.as_deref()) {
            (Some(format), _) => format,
            (None, Some(name)) => OutputFormat::from_str(name, true)
                .map_err(|e| anyhow::anyhow!("Invalid output format in config: {}", e))?,
            (None, None) => OutputFormat::default(),
        };

        Ok(MergedConfig {
            vendor,
            output,
            no_color: no_color || self.no_color.unwrap_or(false),
        })
    }
}

/// Fully resolved configuration after merging CLI args
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub vendor: VendorConfig,
    pub output: OutputFormat,
    pub no_color: bool,
}
