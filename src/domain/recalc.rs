// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/recalc.rs
//
// Derive every displayed grid coordinate from the current state.

use crate::domain::bookmark::BookmarkRecord;
use crate::domain::calibration::{CalibrationModel, GridCoordinate};
use crate::domain::selection::Cell;

/// Inputs to a recalculation, borrowed from the model.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub calibration: CalibrationModel,
    /// Manually entered pixel-cell offsets.
    pub manual: (f64, f64),
    pub selection: Option<Cell>,
    /// Highlighted bookmark row.
    pub bookmark: Option<&'a BookmarkRecord>,
}

/// Bookmark details shown next to the table.
#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkReadout {
    pub name: String,
    pub map: String,
    pub cell: Cell,
    pub grid: GridCoordinate,
}

/// Derived values; `None` means the field is shown empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedOutputs {
    pub manual: Option<GridCoordinate>,
    pub selection: Option<GridCoordinate>,
    pub bookmark: Option<BookmarkReadout>,
}

/// Recompute all derived outputs.
///
/// An invalid calibration clears everything. Otherwise each output is
/// computed on its own and a missing input only clears that output.
pub fn recalculate(snapshot: &Snapshot<'_>) -> DerivedOutputs {
    let calibration = snapshot.calibration;
    if !calibration.is_valid() {
        log::debug!("Calibration invalid, clearing derived coordinates");
        return DerivedOutputs::default();
    }

    let (mox, moy) = snapshot.manual;
    let manual = Some(calibration.transform(mox, moy));

    let selection = snapshot
        .selection
        .map(|cell| calibration.transform(f64::from(cell.x), f64::from(cell.y)));

    let bookmark = snapshot.bookmark.and_then(|record| {
        let Some(cell) = record.cell() else {
            log::debug!("Bookmark `{}` has no numeric position", record.name);
            return None;
        };
        Some(BookmarkReadout {
            name: record.name.clone(),
            map: record.map.clone(),
            cell,
            grid: calibration.transform(f64::from(cell.x), f64::from(cell.y)),
        })
    });

    DerivedOutputs {
        manual,
        selection,
        bookmark,
    }
}
