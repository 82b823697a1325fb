// SPDX-License-Identifier: GPL-3.0-or-later
// src/storage.rs
//
// Loading the map registry and loading/saving bookmarks.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::domain::bookmark::BookmarkRecord;
use crate::domain::registry::MapRegistry;

#[derive(Debug, Default, Serialize, Deserialize)]
struct BookmarkFile {
    #[serde(default, rename = "bookmark")]
    bookmarks: Vec<BookmarkRecord>,
}

/// Load the map registry. A missing file is an empty registry.
pub fn load_registry(path: &Path) -> anyhow::Result<MapRegistry> {
    if !path.exists() {
        log::warn!("Map registry {} not found, no maps available", path.display());
        return Ok(MapRegistry::default());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading map registry {}", path.display()))?;
    let registry: MapRegistry = toml::from_str(&raw)
        .with_context(|| format!("parsing map registry {}", path.display()))?;

    log::info!("Loaded {} maps from {}", registry.maps().len(), path.display());
    Ok(registry)
}

/// Load bookmarks in file order. A missing file is an empty list.
pub fn load_bookmarks(path: &Path) -> anyhow::Result<Vec<BookmarkRecord>> {
    if !path.exists() {
        log::info!("No bookmarks at {}", path.display());
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading bookmarks {}", path.display()))?;
    let file: BookmarkFile =
        toml::from_str(&raw).with_context(|| format!("parsing bookmarks {}", path.display()))?;

    log::info!("Loaded {} bookmarks from {}", file.bookmarks.len(), path.display());
    Ok(file.bookmarks)
}

/// Replace the bookmark file with `bookmarks`.
pub fn save_bookmarks(path: &Path, bookmarks: &[BookmarkRecord]) -> anyhow::Result<()> {
    let file = BookmarkFile {
        bookmarks: bookmarks.to_vec(),
    };
    let raw = toml::to_string(&file).context("serializing bookmarks")?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    fs::write(path, raw).with_context(|| format!("writing bookmarks {}", path.display()))?;

    log::info!("Saved {} bookmarks to {}", bookmarks.len(), path.display());
    Ok(())
}
