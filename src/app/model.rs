// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/model.rs
//
// Application state.

use std::path::PathBuf;

use crate::app::surface::OverlayHandle;
use crate::config::AppConfig;
use crate::constant::APP_NAME;
use crate::domain::bookmark::{BookmarkList, BookmarkRecord};
use crate::domain::calibration::{CalibrationForm, CalibrationModel};
use crate::domain::recalc::{self, DerivedOutputs, Snapshot};
use crate::domain::registry::{MapEntry, MapRegistry};
use crate::domain::selection::SelectionState;

/// Display state of one overlay of the active map.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlayState {
    pub visible: bool,
    pub handle: Option<OverlayHandle>,
}

// =============================================================================
// Model
// =============================================================================

pub struct AppModel {
    // Maps.
    pub registry: MapRegistry,
    pub active_map: Option<usize>,
    pub map_size: (u32, u32),
    pub overlays: Vec<OverlayState>,

    // Calibration.
    pub form: CalibrationForm,
    pub calibration: CalibrationModel,

    // Inputs.
    pub selection: SelectionState,
    pub manual: (f64, f64),
    pub bookmarks: BookmarkList,
    pub bookmarks_path: PathBuf,

    // Derived.
    pub outputs: DerivedOutputs,

    // UI state.
    pub status: Option<String>,
    pub error: Option<String>,
}

impl AppModel {
    pub fn new(config: &AppConfig, registry: MapRegistry, bookmarks: Vec<BookmarkRecord>) -> Self {
        let form = CalibrationForm {
            scale_x_index: config.scale_x_index,
            scale_y_index: config.scale_y_index,
            offset_x: config.offset_x,
            offset_y: config.offset_y,
        };

        let mut model = Self {
            registry,
            active_map: None,
            map_size: (0, 0),
            overlays: Vec::new(),
            form,
            calibration: form.to_model(),
            selection: SelectionState::default(),
            manual: (0.0, 0.0),
            bookmarks: BookmarkList::from_records(bookmarks),
            bookmarks_path: config.bookmarks_file.clone(),
            outputs: DerivedOutputs::default(),
            status: None,
            error: None,
        };
        model.recalculate();
        model
    }

    pub fn active_map(&self) -> Option<&MapEntry> {
        self.active_map.and_then(|index| self.registry.get(index))
    }

    pub fn map_height(&self) -> i32 {
        i32::try_from(self.map_size.1).unwrap_or(i32::MAX)
    }

    pub fn title(&self) -> String {
        match self.active_map() {
            Some(map) => format!("{} - {}", APP_NAME, map.name),
            None => APP_NAME.to_string(),
        }
    }

    /// Re-read the calibration form into the model.
    pub fn update_params(&mut self) {
        let CalibrationModel { mx, my, cx, cy } = self.form.to_model();
        self.calibration.set(mx, my, cx, cy);
    }

    /// Refresh every derived output from the current state.
    pub fn recalculate(&mut self) {
        self.outputs = recalc::recalculate(&Snapshot {
            calibration: self.calibration,
            manual: self.manual,
            selection: self.selection.cell(),
            bookmark: self.bookmarks.current(),
        });
    }

    pub fn set_error<S: Into<String>>(&mut self, msg: S) {
        self.error = Some(msg.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}
