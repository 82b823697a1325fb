// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/selection.rs
//
// Selected map cell and the pixel geometry of the map surface.

use crate::constant::{CELL_SIZE, SQUARE_Y_CORRECTION};

/// A 1-based map cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Cell containing the pixel `(px, py)`.
    pub fn from_pixel(px: i32, py: i32) -> Self {
        Self {
            x: cell_index(px),
            y: cell_index(py),
        }
    }
}

/// 1-based cell index of a pixel position.
pub fn cell_index(pixel: i32) -> i32 {
    1 + pixel / CELL_SIZE
}

/// The most recently marked cell, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionState {
    cell: Option<Cell>,
}

impl SelectionState {
    pub fn select_from_pixel(&mut self, px: i32, py: i32) -> Cell {
        let cell = Cell::from_pixel(px, py);
        self.cell = Some(cell);
        cell
    }

    #[allow(dead_code)]
    pub fn clear(&mut self) {
        self.cell = None;
    }

    #[allow(dead_code)]
    pub fn is_valid(&self) -> bool {
        self.cell.is_some()
    }

    pub fn cell(&self) -> Option<Cell> {
        self.cell
    }
}

// =============================================================================
// Surface geometry
// =============================================================================

/// Convert a scene position into map pixels, flipping y so it grows upwards.
#[allow(clippy::cast_possible_truncation)]
pub fn scene_to_map(scene_x: f64, scene_y: f64, map_height: f64) -> (i32, i32) {
    (scene_x.round() as i32, (map_height - scene_y).round() as i32)
}

/// Top-left corner, in scene space, of the square drawn over the cell under
/// `(scene_x, scene_y)`. Used for both the hover and the selection square.
#[allow(clippy::cast_possible_truncation)]
pub fn square_origin(scene_x: f64, scene_y: f64) -> (i32, i32) {
    let col = (scene_x / f64::from(CELL_SIZE)) as i32;
    let row = (scene_y / f64::from(CELL_SIZE)) as i32;
    (
        col.saturating_mul(CELL_SIZE),
        row.saturating_mul(CELL_SIZE).saturating_sub(SQUARE_Y_CORRECTION),
    )
}

/// Status bar text shown while hovering over the map.
pub fn hover_readout(px: i32, py: i32) -> String {
    format!("X: {} / Y: {}", cell_index(px), cell_index(py))
}
