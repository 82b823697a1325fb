// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/bookmark.rs
//
// Named map cells, kept in table order and editable cell by cell.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constant::{
    BOOKMARK_HIGHLIGHT_X_CORRECTION, CELL_SIZE, DEFAULT_BOOKMARK_NAME, HALF_CELL,
};
use crate::domain::selection::Cell;

/// One bookmark row.
///
/// Fields are kept as entered; `x`/`y` are parsed on demand so a malformed
/// row still loads and only its derived values are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookmarkRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub map: String,
    #[serde(deserialize_with = "lenient_string")]
    pub x: String,
    #[serde(deserialize_with = "lenient_string")]
    pub y: String,
}

/// Accept hand-edited scalars (`x = 5`) as well as strings.
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Int(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
    })
}

impl BookmarkRecord {
    pub fn new(name: impl Into<String>, map: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            map: map.into(),
            x: x.to_string(),
            y: y.to_string(),
        }
    }

    /// Parsed cell, `None` when either coordinate is not an integer.
    pub fn cell(&self) -> Option<Cell> {
        Some(Cell {
            x: self.x.trim().parse().ok()?,
            y: self.y.trim().parse().ok()?,
        })
    }
}

/// Editable bookmark column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookmarkField {
    Name,
    Map,
    X,
    Y,
}

impl FromStr for BookmarkField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "map" => Ok(Self::Map),
            "x" => Ok(Self::X),
            "y" => Ok(Self::Y),
            other => Err(anyhow::anyhow!("unknown bookmark field `{other}`")),
        }
    }
}

impl fmt::Display for BookmarkField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Map => write!(f, "map"),
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
        }
    }
}

/// Ordered bookmark table with an optional highlighted row.
#[derive(Debug, Clone, Default)]
pub struct BookmarkList {
    records: Vec<BookmarkRecord>,
    current: Option<usize>,
}

impl BookmarkList {
    pub fn from_records(records: Vec<BookmarkRecord>) -> Self {
        Self {
            records,
            current: None,
        }
    }

    pub fn all(&self) -> &[BookmarkRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn add(&mut self, record: BookmarkRecord) {
        self.records.push(record);
    }

    /// Append a default-named bookmark for `cell`; no-op without a cell.
    pub fn add_from_selection(&mut self, cell: Option<Cell>, map_name: &str) -> bool {
        let Some(cell) = cell else {
            return false;
        };
        self.add(BookmarkRecord::new(DEFAULT_BOOKMARK_NAME, map_name, cell.x, cell.y));
        true
    }

    /// Remove the row at `index`, shifting later rows up. Out of range is a no-op.
    pub fn remove_at(&mut self, index: usize) -> Option<BookmarkRecord> {
        if index >= self.records.len() {
            return None;
        }
        let removed = self.records.remove(index);

        self.current = match self.current {
            Some(cur) if cur == index => {
                if index < self.records.len() {
                    Some(index)
                } else {
                    self.records.len().checked_sub(1)
                }
            }
            Some(cur) if cur > index => Some(cur - 1),
            other => other,
        };
        Some(removed)
    }

    /// Remove the highlighted row; no-op when nothing is highlighted.
    pub fn remove_current(&mut self) -> Option<BookmarkRecord> {
        self.current.and_then(|index| self.remove_at(index))
    }

    /// Highlight `row`; out-of-range rows clear the highlight.
    pub fn select(&mut self, row: Option<usize>) {
        self.current = row.filter(|&r| r < self.records.len());
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current(&self) -> Option<&BookmarkRecord> {
        self.current.and_then(|index| self.records.get(index))
    }

    /// Overwrite one field of row `index`. Returns `false` for a missing row.
    pub fn edit(&mut self, index: usize, field: BookmarkField, value: impl Into<String>) -> bool {
        let Some(record) = self.records.get_mut(index) else {
            return false;
        };
        let value = value.into();
        match field {
            BookmarkField::Name => record.name = value,
            BookmarkField::Map => record.map = value,
            BookmarkField::X => record.x = value,
            BookmarkField::Y => record.y = value,
        }
        true
    }
}

// =============================================================================
// Placement on the map surface
// =============================================================================

/// Where the view centres and the highlight square lands for a bookmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookmarkPlacement {
    pub center: (i32, i32),
    pub highlight: (i32, i32),
}

impl BookmarkPlacement {
    pub fn for_cell(cell: Cell, map_height: i32) -> Self {
        let x_pos = cell.x.saturating_mul(CELL_SIZE);
        let y_pos = map_height.saturating_sub(cell.y.saturating_mul(CELL_SIZE));
        Self {
            center: (x_pos.saturating_add(HALF_CELL), y_pos.saturating_add(HALF_CELL)),
            highlight: (x_pos.saturating_sub(BOOKMARK_HIGHLIGHT_X_CORRECTION), y_pos),
        }
    }
}
