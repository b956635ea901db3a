//! Service configuration.
//!
//! Settings live in an optional `cdnmate.toml`. Keys not set in the file
//! keep their stock defaults. The config is loaded once at startup and
//! never changes afterwards.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! image_quality = 90                            # JPEG/WebP quality (0-100)
//! cdn_url = "http://127.0.0.1/media/"           # Public base of returned URLs
//! uploader_url = "http://127.0.0.1:8080/media/" # PUT destination base
//! upload_timeout_secs = 30                      # Whole-request upload timeout
//! ```
//!
//! `cdn_url` and `uploader_url` usually point at the same storage through two
//! different hosts. They are not checked against each other.
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::Quality;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Name of the config file looked up by [`load_config`].
pub const CONFIG_FILE_NAME: &str = "cdnmate.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Service configuration loaded from `cdnmate.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default JPEG/WebP encoding quality (0 = worst, 100 = best).
    pub image_quality: u32,
    /// Public base URL the returned addresses are built from.
    pub cdn_url: String,
    /// Base URL uploads are `PUT` to.
    pub uploader_url: String,
    /// Timeout for a whole upload request, in seconds.
    pub upload_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_quality: 90,
            cdn_url: "http://127.0.0.1/media/".to_string(),
            uploader_url: "http://127.0.0.1:8080/media/".to_string(),
            upload_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Parse a TOML document on top of the stock defaults and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let overlay: toml::Value = toml::from_str(content)?;
        resolve_config(stock_defaults_value()?, Some(overlay))
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.image_quality > Quality::MAX {
            return Err(ConfigError::Validation(
                "image_quality must be 0-100".into(),
            ));
        }
        validate_http_url("cdn_url", &self.cdn_url)?;
        validate_http_url("uploader_url", &self.uploader_url)?;
        if self.upload_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "upload_timeout_secs must be non-zero".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.image_quality)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    let url = reqwest::Url::parse(value)
        .map_err(|e| ConfigError::Validation(format!("{key} is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Validation(format!(
            "{key} must use http or https, got {other}"
        ))),
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged on top of.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(Config::default())?)
}

/// Overlay the top-level keys of `overlay` onto `base`.
///
/// `Config` is flat, so each overlay key replaces the base value whole.
/// Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            base_table.extend(overlay_table);
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `cdnmate.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no config file exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `cdnmate.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `cdnmate.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# cdnmate Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# JPEG/WebP encoding quality (0 = worst, 100 = best).
# PNG output is lossless and ignores this value.
image_quality = 90

# Public base URL. The returned address is cdn_url joined with the
# generated filename.
cdn_url = "http://127.0.0.1/media/"

# Base URL uploads are sent to with HTTP PUT <uploader_url>/<filename>.
# Must point at the same storage that cdn_url serves.
uploader_url = "http://127.0.0.1:8080/media/"

# Upload request timeout in seconds (connect + send + response).
upload_timeout_secs = 30
"##
}
