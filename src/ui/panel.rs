// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/panel.rs
//
// Text rendering of the side panel: calibration, selection, manual entry, bookmarks.

use std::fmt;

use crate::app::AppModel;
use crate::domain::calibration::{GridCoordinate, SCALE_ENTRIES};

fn coord(value: Option<GridCoordinate>) -> String {
    value.map(|g| g.to_string()).unwrap_or_default()
}

fn combo(index: usize) -> &'static str {
    match SCALE_ENTRIES.get(index) {
        Some(entry) if !entry.is_empty() => entry,
        _ => "-",
    }
}

/// The side panel as it would appear next to the map.
pub struct Panel<'a>(pub &'a AppModel);

impl fmt::Display for Panel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;

        writeln!(f, "== {} ==", model.title())?;
        if let Some(map) = model.active_map() {
            for (i, (overlay, state)) in map.overlays.iter().zip(&model.overlays).enumerate() {
                let mark = if state.visible { 'x' } else { ' ' };
                writeln!(f, "  overlay {i} [{mark}] {}", overlay.name)?;
            }
        }

        let form = &model.form;
        writeln!(
            f,
            "calibration  mx={} my={} cx={} cy={}",
            combo(form.scale_x_index),
            combo(form.scale_y_index),
            form.offset_x,
            form.offset_y
        )?;

        let selected = model
            .selection
            .cell()
            .map(|c| format!("{} / {}", c.x, c.y))
            .unwrap_or_default();
        writeln!(
            f,
            "selection    {selected:<12} -> {}",
            coord(model.outputs.selection)
        )?;

        let (mox, moy) = model.manual;
        let manual = format!("{mox} / {moy}");
        writeln!(
            f,
            "manual       {manual:<12} -> {}",
            coord(model.outputs.manual)
        )?;

        match &model.outputs.bookmark {
            Some(b) => writeln!(
                f,
                "bookmark     {} ({}) {} / {} -> {}",
                b.name, b.map, b.cell.x, b.cell.y, b.grid
            )?,
            None => writeln!(f, "bookmark     ")?,
        }

        if model.bookmarks.is_empty() {
            writeln!(f, "  (no bookmarks)")?;
        }
        for (i, record) in model.bookmarks.all().iter().enumerate() {
            let cursor = if model.bookmarks.current_index() == Some(i) {
                '>'
            } else {
                ' '
            };
            writeln!(
                f,
                "{cursor} {i:>3}  {:<16} {:<12} {:>4} {:>4}",
                record.name, record.map, record.x, record.y
            )?;
        }

        if let Some(status) = &model.status {
            writeln!(f, "status: {status}")?;
        }
        if let Some(error) = &model.error {
            writeln!(f, "error: {error}")?;
        }
        Ok(())
    }
}
