// SPDX-License-Identifier: GPL-3.0-or-later
// src/constant.rs
//
// Application constants that should not be changed by the user.

/// Application name (window title prefix, config directory).
pub const APP_NAME: &str = "Telescience Manager";

/// Config directory name below the platform config dir.
pub const CONFIG_DIR: &str = "telesmap";

/// Config file name inside `CONFIG_DIR`.
pub const CONFIG_FILE: &str = "config.toml";

/// Default map registry file (relative to the working directory).
pub const MAPS_FILE: &str = "maps.toml";

/// Default bookmark file (relative to the working directory).
pub const BOOKMARKS_FILE: &str = "bookmarks.toml";

/// Edge length of one map cell in pixels.
pub const CELL_SIZE: i32 = 32;

/// Half a cell, used to centre the view on a cell.
pub const HALF_CELL: i32 = CELL_SIZE / 2;

/// Horizontal correction applied to the bookmark highlight's left edge.
// TODO: replace with a geometric formula once the marker alignment is understood.
pub const BOOKMARK_HIGHLIGHT_X_CORRECTION: i32 = 32;

/// Vertical correction applied to the hover and selection squares.
pub const SQUARE_Y_CORRECTION: i32 = 1;

/// Scale divisors offered by the calibration combos, in combo order after the blank entry.
pub const SCALE_OPTIONS: [i32; 3] = [1, 2, 4];

/// Name given to freshly added bookmarks.
pub const DEFAULT_BOOKMARK_NAME: &str = "Bookmark";
