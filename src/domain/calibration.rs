// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/calibration.rs
//
// Calibration model: affine mapping from map cells to game grid coordinates.

use std::fmt;

use crate::constant::SCALE_OPTIONS;

/// Game grid coordinate derived from a cell position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCoordinate {
    pub tx: f64,
    pub ty: f64,
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.tx, self.ty)
    }
}

/// Calibration parameters.
///
/// `mx`/`my` are the scale divisors, `cx`/`cy` are offsets added before
/// dividing. The transform is only defined while both divisors are non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationModel {
    pub mx: i32,
    pub my: i32,
    pub cx: f64,
    pub cy: f64,
}

impl CalibrationModel {
    pub fn new(mx: i32, my: i32, cx: f64, cy: f64) -> Self {
        Self { mx, my, cx, cy }
    }

    pub fn set(&mut self, mx: i32, my: i32, cx: f64, cy: f64) {
        *self = Self::new(mx, my, cx, cy);
    }

    pub fn is_valid(&self) -> bool {
        self.mx != 0 && self.my != 0
    }

    /// Forward transform `((px + cx) / mx, (py + cy) / my)`.
    ///
    /// Callers must check [`Self::is_valid`] first.
    pub fn transform(&self, px: f64, py: f64) -> GridCoordinate {
        debug_assert!(self.is_valid(), "transform on invalid calibration");
        GridCoordinate {
            tx: (px + self.cx) / f64::from(self.mx),
            ty: (py + self.cy) / f64::from(self.my),
        }
    }
}

// =============================================================================
// Calibration form
// =============================================================================

/// Combo entries for the scale divisors. Entry 0 is blank and does not parse.
pub const SCALE_ENTRIES: [&str; 4] = ["", "1", "2", "4"];

/// Scale divisor shown at a combo index, `None` for the blank or out-of-range entries.
pub fn scale_at(index: usize) -> Option<i32> {
    SCALE_ENTRIES.get(index)?.parse().ok()
}

/// Combo index for a divisor; 1 and 2 map onto themselves, 4 onto the last entry.
pub fn scale_index(value: i32) -> Option<usize> {
    SCALE_OPTIONS
        .iter()
        .position(|&option| option == value)
        .map(|pos| pos + 1)
}

/// Inline calibration inputs: two scale combos and two offset spin boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationForm {
    pub scale_x_index: usize,
    pub scale_y_index: usize,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl CalibrationForm {
    /// Apply values confirmed in the calibration dialog.
    ///
    /// Divisors outside {1, 2, 4} leave their combo untouched; offsets always apply.
    pub fn apply_dialog(&mut self, mx: i32, my: i32, cx: f64, cy: f64) {
        match scale_index(mx) {
            Some(index) => self.scale_x_index = index,
            None => log::debug!("Ignoring unsupported X divisor {mx}"),
        }
        match scale_index(my) {
            Some(index) => self.scale_y_index = index,
            None => log::debug!("Ignoring unsupported Y divisor {my}"),
        }
        self.offset_x = cx;
        self.offset_y = cy;
    }

    /// Read the form into a model. A blank combo yields a zero (invalid) divisor.
    pub fn to_model(&self) -> CalibrationModel {
        CalibrationModel::new(
            scale_at(self.scale_x_index).unwrap_or(0),
            scale_at(self.scale_y_index).unwrap_or(0),
            self.offset_x,
            self.offset_y,
        )
    }
}
