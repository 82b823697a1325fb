// SPDX-License-Identifier: GPL-3.0-or-later
// src/config.rs
//
// Global configuration for the application, read from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::constant::{BOOKMARKS_FILE, CONFIG_DIR, CONFIG_FILE, MAPS_FILE};

/// Global configuration for the application.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Map registry listing maps and their overlays.
    pub maps_file: PathBuf,
    /// Bookmark file, fully rewritten on save.
    pub bookmarks_file: PathBuf,
    /// Combo index preselected for the X scale divisor (0 = blank).
    pub scale_x_index: usize,
    /// Combo index preselected for the Y scale divisor (0 = blank).
    pub scale_y_index: usize,
    /// Initial X offset.
    pub offset_x: f64,
    /// Initial Y offset.
    pub offset_y: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            maps_file: PathBuf::from(MAPS_FILE),
            bookmarks_file: PathBuf::from(BOOKMARKS_FILE),
            scale_x_index: 0,
            scale_y_index: 0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl AppConfig {
    /// Default config location: `<config dir>/telesmap/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the config from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "scale_x_index = 2\noffset_y = -3.5\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.scale_x_index, 2);
        assert_eq!(config.offset_y, -3.5);
        assert_eq!(config.maps_file, PathBuf::from(MAPS_FILE));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "scale_x_index = \"two\"").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
