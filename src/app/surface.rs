// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/surface.rs
//
// Rendering collaborator: displays the map, overlays and cell markers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::registry::MapEntry;

/// Opaque handle to an overlay shown on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayHandle(u64);

impl OverlayHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

/// What the controller needs from whatever draws the map.
pub trait RenderSurface {
    /// Replace the displayed image set with `map`. Returns its pixel size,
    /// `(0, 0)` when the image could not be read.
    fn set_active_map(&mut self, map: &MapEntry) -> (u32, u32);

    /// Show an overlay image; `None` when it could not be loaded.
    fn add_overlay(&mut self, path: &Path) -> Option<OverlayHandle>;

    fn remove_overlay(&mut self, handle: OverlayHandle);

    /// Move the hover/bookmark highlight square (scene coordinates).
    fn highlight_at(&mut self, x: i32, y: i32);

    /// Move the selection square (scene coordinates).
    fn select_at(&mut self, x: i32, y: i32);

    fn center_view_on(&mut self, x: i32, y: i32);

    fn reset_zoom(&mut self);
}

/// Read the pixel size of an image file.
#[cfg(feature = "image")]
fn image_size(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(size) => Some(size),
        Err(e) => {
            log::warn!("Failed to read image {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(not(feature = "image"))]
fn image_size(path: &Path) -> Option<(u32, u32)> {
    log::warn!(
        "Built without image support, size of {} unknown",
        path.display()
    );
    None
}

/// Surface without a window: tracks what would be on screen.
#[derive(Debug, Default)]
pub struct HeadlessSurface {
    pub map_path: Option<PathBuf>,
    pub map_size: (u32, u32),
    pub overlays: HashMap<OverlayHandle, PathBuf>,
    pub highlight: Option<(i32, i32)>,
    pub selected: Option<(i32, i32)>,
    pub center: Option<(i32, i32)>,
    next_handle: u64,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for HeadlessSurface {
    fn set_active_map(&mut self, map: &MapEntry) -> (u32, u32) {
        self.overlays.clear();
        self.highlight = None;
        self.selected = None;
        self.center = None;
        self.map_path = Some(map.image_path.clone());
        self.map_size = image_size(&map.image_path).unwrap_or((0, 0));
        self.map_size
    }

    fn add_overlay(&mut self, path: &Path) -> Option<OverlayHandle> {
        image_size(path)?;
        let handle = OverlayHandle::new(self.next_handle);
        self.next_handle += 1;
        self.overlays.insert(handle, path.to_path_buf());
        Some(handle)
    }

    fn remove_overlay(&mut self, handle: OverlayHandle) {
        if self.overlays.remove(&handle).is_none() {
            log::debug!("Overlay {handle:?} was not shown");
        }
    }

    fn highlight_at(&mut self, x: i32, y: i32) {
        self.highlight = Some((x, y));
    }

    fn select_at(&mut self, x: i32, y: i32) {
        self.selected = Some((x, y));
    }

    fn center_view_on(&mut self, x: i32, y: i32) {
        self.center = Some((x, y));
    }

    fn reset_zoom(&mut self) {
        log::debug!("Zoom reset");
    }
}
