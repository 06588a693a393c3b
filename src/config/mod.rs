// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! Only ambient preferences are persisted (language, brightness, sensor
//! permission). Navigation state is deliberately not persisted: the viewer
//! always starts on the first panorama with a fresh marker layout.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "PanoLens";

/// Default brightness slider position.
pub const DEFAULT_BRIGHTNESS_PERCENT: u8 = 20;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub language: Option<String>,
    /// Brightness slider position in `[1, 100]`.
    #[serde(default)]
    pub brightness_percent: Option<u8>,
    /// Whether the user granted access to the orientation sensor.
    #[serde(default)]
    pub motion_permission: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            brightness_percent: Some(DEFAULT_BRIGHTNESS_PERCENT),
            motion_permission: Some(false),
        }
    }
}

fn get_default_config_path() -> Option<PathBuf> {
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

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_default())
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
