// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Examples
//!
//! ```no_run
//! use stiloz::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.font_family = Some("DejaVu Sans".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_file = PathBuf::from("./temp_config_dir/settings.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded.font_family, Some("DejaVu Sans".to_string()));
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "Stiloz";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "STILOZ_CONFIG_DIR";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Where exported posters are written. Defaults to the user's picture
    /// directory, then the current directory.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    /// JPEG quality of the committed profile photo, 0.0 to 1.0.
    #[serde(default)]
    pub photo_quality: Option<f32>,
    /// Upscale factor of the exported poster.
    #[serde(default)]
    pub export_scale: Option<f32>,
    /// Longest edge kept for uploaded photos.
    #[serde(default)]
    pub upload_max_dimension: Option<u32>,
    /// Background template image. A solid backdrop is used when unset.
    #[serde(default)]
    pub background: Option<PathBuf>,
    #[serde(default)]
    pub font_family: Option<String>,
    /// How long an export waits for the background asset.
    #[serde(default)]
    pub asset_timeout_ms: Option<u64>,
}

impl Config {
    #[must_use]
    pub fn photo_quality(&self) -> f32 {
        self.photo_quality
            .filter(|q| q.is_finite())
            .unwrap_or(DEFAULT_PHOTO_QUALITY)
            .clamp(MIN_PHOTO_QUALITY, MAX_PHOTO_QUALITY)
    }

    #[must_use]
    pub fn export_scale(&self) -> f32 {
        self.export_scale
            .filter(|s| s.is_finite())
            .unwrap_or(DEFAULT_EXPORT_SCALE)
            .clamp(MIN_EXPORT_SCALE, MAX_EXPORT_SCALE)
    }

    #[must_use]
    pub fn upload_max_dimension(&self) -> u32 {
        self.upload_max_dimension
            .unwrap_or(DEFAULT_UPLOAD_MAX_DIMENSION)
            .clamp(MIN_UPLOAD_MAX_DIMENSION, MAX_UPLOAD_MAX_DIMENSION)
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        self.font_family
            .as_deref()
            .filter(|family| !family.trim().is_empty())
            .unwrap_or(DEFAULT_FONT_FAMILY)
    }

    #[must_use]
    pub fn asset_timeout(&self) -> Duration {
        Duration::from_millis(self.asset_timeout_ms.unwrap_or(DEFAULT_ASSET_TIMEOUT_MS))
    }

    /// Resolved export directory.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .or_else(dirs::picture_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolves `settings.toml`, honoring [`ENV_CONFIG_DIR`] before the platform default.
fn get_default_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(ENV_CONFIG_DIR).filter(|dir| !dir.is_empty()) {
        return Some(PathBuf::from(dir).join(CONFIG_FILE));
    }
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Reads a config file. Unparseable content falls back to defaults.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("Ignoring invalid config at {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_fields() {
        let config = Config {
            output_dir: Some(PathBuf::from("/tmp/posters")),
            photo_quality: Some(0.75),
            export_scale: Some(3.0),
            background: Some(PathBuf::from("pad_poster_page.png")),
            ..Config::default()
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_returns_default_on_invalid_toml() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let loaded = load_from_path(&config_path).expect("load should not error");
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn save_to_path_creates_parent_directories() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("deep").join("path").join("settings.toml");

        save_to_path(&Config::default(), &config_path).expect("save should create directories");
        assert!(config_path.exists());
    }

    #[test]
    fn accessors_fall_back_to_defaults() {
        let config = Config::default();
        assert_eq!(config.photo_quality(), DEFAULT_PHOTO_QUALITY);
        assert_eq!(config.export_scale(), DEFAULT_EXPORT_SCALE);
        assert_eq!(config.upload_max_dimension(), DEFAULT_UPLOAD_MAX_DIMENSION);
        assert_eq!(config.font_family(), DEFAULT_FONT_FAMILY);
        assert_eq!(
            config.asset_timeout(),
            Duration::from_millis(DEFAULT_ASSET_TIMEOUT_MS)
        );
    }

    #[test]
    fn accessors_clamp_out_of_range_values() {
        let config = Config {
            photo_quality: Some(4.0),
            export_scale: Some(0.0),
            upload_max_dimension: Some(10),
            font_family: Some("   ".into()),
            ..Config::default()
        };
        assert_eq!(config.photo_quality(), MAX_PHOTO_QUALITY);
        assert_eq!(config.export_scale(), MIN_EXPORT_SCALE);
        assert_eq!(config.upload_max_dimension(), MIN_UPLOAD_MAX_DIMENSION);
        assert_eq!(config.font_family(), DEFAULT_FONT_FAMILY);
    }
}
