// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/registry.rs
//
// Read-only catalogue of maps and their overlays.

use std::path::PathBuf;

use serde::Deserialize;

/// An image that can be laid over a map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverlayEntry {
    pub name: String,
    #[serde(rename = "path")]
    pub image_path: PathBuf,
}

/// A map image with its overlays.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapEntry {
    pub name: String,
    #[serde(rename = "path")]
    pub image_path: PathBuf,
    #[serde(default, rename = "overlay")]
    pub overlays: Vec<OverlayEntry>,
}

/// Maps in registry order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MapRegistry {
    #[serde(default, rename = "map")]
    maps: Vec<MapEntry>,
}

impl MapRegistry {
    #[allow(dead_code)]
    pub fn new(maps: Vec<MapEntry>) -> Self {
        Self { maps }
    }

    pub fn maps(&self) -> &[MapEntry] {
        &self.maps
    }

    pub fn get(&self, index: usize) -> Option<&MapEntry> {
        self.maps.get(index)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.maps.iter().position(|m| m.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }
}
