// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/update.rs
//
// Apply one message to the model, drive the surface, then recalculate.

use crate::app::message::AppMessage;
use crate::app::model::{AppModel, OverlayState};
use crate::app::surface::RenderSurface;
use crate::domain::bookmark::BookmarkPlacement;
use crate::domain::selection::{hover_readout, scene_to_map, square_origin};
use crate::storage;

/// Apply `message`. Every path ends with exactly one recalculation.
pub fn update<S: RenderSurface>(model: &mut AppModel, surface: &mut S, message: &AppMessage) {
    match message {
        AppMessage::SelectMap(index) => select_map(model, surface, *index),
        AppMessage::ToggleOverlay(index) => toggle_overlay(model, surface, *index),

        AppMessage::Mark { x, y } => {
            let (px, py) = scene_to_map(*x, *y, f64::from(model.map_size.1));
            let cell = model.selection.select_from_pixel(px, py);
            let (sx, sy) = square_origin(*x, *y);
            surface.select_at(sx, sy);
            log::debug!("Marked cell {}/{}", cell.x, cell.y);
        }
        AppMessage::Hover { x, y } => {
            let (px, py) = scene_to_map(*x, *y, f64::from(model.map_size.1));
            model.status = Some(hover_readout(px, py));
            let (hx, hy) = square_origin(*x, *y);
            surface.highlight_at(hx, hy);
        }
        AppMessage::ResetZoom => surface.reset_zoom(),

        AppMessage::Calibrated { mx, my, cx, cy } => {
            model.form.apply_dialog(*mx, *my, *cx, *cy);
            model.update_params();
        }
        AppMessage::SetScaleX(index) => {
            model.form.scale_x_index = *index;
            model.update_params();
        }
        AppMessage::SetScaleY(index) => {
            model.form.scale_y_index = *index;
            model.update_params();
        }
        AppMessage::SetOffsetX(value) => {
            model.form.offset_x = *value;
            model.update_params();
        }
        AppMessage::SetOffsetY(value) => {
            model.form.offset_y = *value;
            model.update_params();
        }

        AppMessage::SetManual { x, y } => model.manual = (*x, *y),

        AppMessage::AddBookmark => {
            let map_name = model.active_map().map(|m| m.name.clone()).unwrap_or_default();
            if model.bookmarks.add_from_selection(model.selection.cell(), &map_name) {
                log::info!("Added bookmark {} on {map_name}", model.bookmarks.len());
            }
        }
        AppMessage::DeleteBookmark => {
            if let Some(removed) = model.bookmarks.remove_current() {
                log::info!(
                    "Deleted bookmark `{}`, {} left",
                    removed.name,
                    model.bookmarks.len()
                );
                place_bookmark(model, surface);
            }
        }
        AppMessage::SaveBookmarks => {
            if let Err(e) = storage::save_bookmarks(&model.bookmarks_path, model.bookmarks.all()) {
                log::error!("Failed to save bookmarks: {e:#}");
                model.set_error(format!("{e:#}"));
            }
        }
        AppMessage::SelectBookmark(row) => {
            model.bookmarks.select(*row);
            place_bookmark(model, surface);
        }
        AppMessage::EditBookmark { row, field, value } => {
            if !model.bookmarks.edit(*row, *field, value.clone()) {
                log::debug!("No bookmark row {row} to edit");
            }
        }

        AppMessage::ShowError(msg) => model.set_error(msg.clone()),
        AppMessage::ClearError => model.clear_error(),
        AppMessage::NoOp => {}
    }

    // A calibration change re-shows the highlighted bookmark, like selecting it.
    if matches!(
        message,
        AppMessage::Calibrated { .. }
            | AppMessage::SetScaleX(_)
            | AppMessage::SetScaleY(_)
            | AppMessage::SetOffsetX(_)
            | AppMessage::SetOffsetY(_)
    ) {
        place_bookmark(model, surface);
    }

    model.recalculate();
}

fn select_map<S: RenderSurface>(model: &mut AppModel, surface: &mut S, index: usize) {
    let Some(map) = model.registry.get(index) else {
        log::warn!("No map at index {index}");
        return;
    };

    model.map_size = surface.set_active_map(map);
    model.overlays = vec![OverlayState::default(); map.overlays.len()];
    model.active_map = Some(index);
    log::info!(
        "Switched to map {} ({}x{})",
        map.name,
        model.map_size.0,
        model.map_size.1
    );
}

fn toggle_overlay<S: RenderSurface>(model: &mut AppModel, surface: &mut S, index: usize) {
    let Some(entry) = model.active_map().and_then(|m| m.overlays.get(index)).cloned() else {
        log::warn!("No overlay at index {index}");
        return;
    };
    let Some(state) = model.overlays.get_mut(index) else {
        return;
    };

    state.visible = !state.visible;
    if state.visible && state.handle.is_none() {
        state.handle = surface.add_overlay(&entry.image_path);
        log::info!("Showing overlay {}", entry.name);
    } else if let Some(handle) = state.handle.take() {
        surface.remove_overlay(handle);
        log::info!("Hiding overlay {}", entry.name);
    }
}

/// Centre the view on the highlighted bookmark when it belongs to the active map.
fn place_bookmark<S: RenderSurface>(model: &AppModel, surface: &mut S) {
    let Some(record) = model.bookmarks.current() else {
        return;
    };
    let Some(cell) = record.cell() else {
        return;
    };
    if model.active_map().is_none_or(|map| map.name != record.map) {
        return;
    }

    let placement = BookmarkPlacement::for_cell(cell, model.map_height());
    surface.center_view_on(placement.center.0, placement.center.1);
    surface.highlight_at(placement.highlight.0, placement.highlight.1);
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::app::surface::OverlayHandle;
    use crate::config::AppConfig;
    use crate::domain::bookmark::{BookmarkField, BookmarkRecord};
    use crate::domain::calibration::GridCoordinate;
    use crate::domain::registry::{MapEntry, MapRegistry, OverlayEntry};
    use crate::domain::selection::Cell;

    /// Records surface calls instead of drawing.
    #[derive(Default)]
    struct RecordingSurface {
        size: (u32, u32),
        fail_overlays: bool,
        next: u64,
        shown: Vec<OverlayHandle>,
        highlight: Option<(i32, i32)>,
        selected: Option<(i32, i32)>,
        center: Option<(i32, i32)>,
        zoom_resets: usize,
    }

    impl RenderSurface for RecordingSurface {
        fn set_active_map(&mut self, _map: &MapEntry) -> (u32, u32) {
            self.shown.clear();
            self.size
        }

        fn add_overlay(&mut self, _path: &Path) -> Option<OverlayHandle> {
            if self.fail_overlays {
                return None;
            }
            let handle = OverlayHandle::new(self.next);
            self.next += 1;
            self.shown.push(handle);
            Some(handle)
        }

        fn remove_overlay(&mut self, handle: OverlayHandle) {
            self.shown.retain(|h| *h != handle);
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
            self.zoom_resets += 1;
        }
    }

    fn registry() -> MapRegistry {
        MapRegistry::new(vec![
            MapEntry {
                name: "M1".into(),
                image_path: PathBuf::from("m1.png"),
                overlays: vec![OverlayEntry {
                    name: "Wires".into(),
                    image_path: PathBuf::from("m1_wires.png"),
                }],
            },
            MapEntry {
                name: "M2".into(),
                image_path: PathBuf::from("m2.png"),
                overlays: Vec::new(),
            },
        ])
    }

    fn setup(bookmarks: Vec<BookmarkRecord>) -> (AppModel, RecordingSurface) {
        let mut model = AppModel::new(&AppConfig::default(), registry(), bookmarks);
        let mut surface = RecordingSurface {
            size: (1024, 1024),
            ..Default::default()
        };
        update(&mut model, &mut surface, &AppMessage::SelectMap(0));
        (model, surface)
    }

    fn calibrate(model: &mut AppModel, surface: &mut RecordingSurface, mx: i32, my: i32) {
        update(
            model,
            surface,
            &AppMessage::Calibrated {
                mx,
                my,
                cx: 0.0,
                cy: 0.0,
            },
        );
    }

    #[test]
    fn mark_scenario_yields_expected_transform() {
        let (mut model, mut surface) = setup(Vec::new());
        calibrate(&mut model, &mut surface, 2, 1);

        // Scene y 992 on a 1024 high map is map pixel y 32.
        update(&mut model, &mut surface, &AppMessage::Mark { x: 64.0, y: 992.0 });

        assert_eq!(model.selection.cell(), Some(Cell { x: 3, y: 2 }));
        assert_eq!(model.outputs.selection, Some(GridCoordinate { tx: 1.5, ty: 2.0 }));
        assert_eq!(surface.selected, Some((64, 991)));
    }

    #[test]
    fn invalid_calibration_clears_previous_outputs() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("A", "M1", 5, 10)]);
        calibrate(&mut model, &mut surface, 2, 1);
        update(&mut model, &mut surface, &AppMessage::Mark { x: 64.0, y: 992.0 });
        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));
        assert!(model.outputs.selection.is_some());
        assert!(model.outputs.bookmark.is_some());
        assert!(model.outputs.manual.is_some());

        update(&mut model, &mut surface, &AppMessage::SetScaleX(0));

        assert_eq!(model.calibration.mx, 0);
        assert!(model.outputs.manual.is_none());
        assert!(model.outputs.selection.is_none());
        assert!(model.outputs.bookmark.is_none());
    }

    #[test]
    fn hover_updates_readout_without_touching_selection() {
        let (mut model, mut surface) = setup(Vec::new());
        update(&mut model, &mut surface, &AppMessage::Hover { x: 70.0, y: 990.0 });

        assert_eq!(model.status.as_deref(), Some("X: 3 / Y: 2"));
        assert_eq!(surface.highlight, Some((64, 959)));
        assert!(!model.selection.is_valid());
    }

    #[test]
    fn bookmark_on_active_map_moves_highlight() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("A", "M1", 5, 10)]);
        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));

        assert_eq!(surface.highlight, Some((5 * 32 - 32, 1024 - 10 * 32)));
        assert_eq!(surface.center, Some((5 * 32 + 16, 1024 - 10 * 32 + 16)));
    }

    #[test]
    fn bookmark_on_other_map_leaves_view_alone() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("B", "M2", 5, 10)]);
        calibrate(&mut model, &mut surface, 1, 1);
        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));

        assert_eq!(surface.center, None);
        assert_eq!(
            model.outputs.bookmark.map(|b| b.grid),
            Some(GridCoordinate { tx: 5.0, ty: 10.0 })
        );
    }

    #[test]
    fn add_bookmark_needs_selection() {
        let (mut model, mut surface) = setup(Vec::new());
        update(&mut model, &mut surface, &AppMessage::AddBookmark);
        assert!(model.bookmarks.is_empty());

        update(&mut model, &mut surface, &AppMessage::Mark { x: 64.0, y: 992.0 });
        update(&mut model, &mut surface, &AppMessage::AddBookmark);
        assert_eq!(model.bookmarks.all(), &[BookmarkRecord::new("Bookmark", "M1", 3, 2)]);
    }

    #[test]
    fn delete_without_highlight_is_noop() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("A", "M1", 1, 1)]);
        update(&mut model, &mut surface, &AppMessage::DeleteBookmark);
        assert_eq!(model.bookmarks.len(), 1);

        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));
        update(&mut model, &mut surface, &AppMessage::DeleteBookmark);
        assert!(model.bookmarks.is_empty());
        assert!(model.outputs.bookmark.is_none());
    }

    #[test]
    fn editing_highlighted_row_refreshes_its_transform() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("A", "M1", 4, 4)]);
        calibrate(&mut model, &mut surface, 2, 2);
        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));

        let edit = |value: &str| AppMessage::EditBookmark {
            row: 0,
            field: BookmarkField::X,
            value: value.into(),
        };
        update(&mut model, &mut surface, &edit("8"));
        assert_eq!(
            model.outputs.bookmark.as_ref().map(|b| b.grid),
            Some(GridCoordinate { tx: 4.0, ty: 2.0 })
        );

        update(&mut model, &mut surface, &edit("eight"));
        assert!(model.outputs.bookmark.is_none());
        assert!(model.outputs.manual.is_some());
    }

    #[test]
    fn manual_entry_uses_offsets() {
        let (mut model, mut surface) = setup(Vec::new());
        update(
            &mut model,
            &mut surface,
            &AppMessage::Calibrated {
                mx: 4,
                my: 2,
                cx: 2.0,
                cy: -1.0,
            },
        );
        update(&mut model, &mut surface, &AppMessage::SetManual { x: 10.0, y: 5.0 });
        assert_eq!(model.outputs.manual, Some(GridCoordinate { tx: 3.0, ty: 2.0 }));
    }

    #[test]
    fn overlay_toggle_adds_and_removes() {
        let (mut model, mut surface) = setup(Vec::new());
        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(0));
        assert_eq!(surface.shown.len(), 1);
        assert!(model.overlays[0].visible);

        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(0));
        assert!(surface.shown.is_empty());
        assert_eq!(model.overlays[0], OverlayState::default());
    }

    #[test]
    fn failed_overlay_load_is_tolerated() {
        let (mut model, mut surface) = setup(Vec::new());
        surface.fail_overlays = true;

        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(0));
        assert!(model.overlays[0].visible);
        assert!(model.overlays[0].handle.is_none());

        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(0));
        assert!(!model.overlays[0].visible);
        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(7));
    }

    #[test]
    fn switching_maps_forgets_overlays_and_sets_title() {
        let (mut model, mut surface) = setup(Vec::new());
        update(&mut model, &mut surface, &AppMessage::ToggleOverlay(0));
        update(&mut model, &mut surface, &AppMessage::SelectMap(1));

        assert!(model.overlays.is_empty());
        assert!(surface.shown.is_empty());
        assert_eq!(model.title(), "Telescience Manager - M2");

        update(&mut model, &mut surface, &AppMessage::SelectMap(9));
        assert_eq!(model.active_map, Some(1));
    }

    #[test]
    fn save_round_trips_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let (mut model, mut surface) = setup(vec![
            BookmarkRecord::new("A", "M1", 5, 10),
            BookmarkRecord::new("B", "M2", 1, 2),
        ]);
        model.bookmarks_path = dir.path().join("bookmarks.toml");

        update(&mut model, &mut surface, &AppMessage::SaveBookmarks);
        assert!(model.error.is_none());
        assert_eq!(
            storage::load_bookmarks(&model.bookmarks_path).unwrap(),
            model.bookmarks.all()
        );
    }

    #[test]
    fn calibration_change_recentres_on_highlighted_bookmark() {
        let (mut model, mut surface) = setup(vec![BookmarkRecord::new("A", "M1", 5, 10)]);
        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));
        surface.center = None;
        surface.highlight = None;

        update(&mut model, &mut surface, &AppMessage::SetOffsetX(3.0));
        assert_eq!(surface.center, Some((5 * 32 + 16, 1024 - 10 * 32 + 16)));
        assert_eq!(surface.highlight, Some((5 * 32 - 32, 1024 - 10 * 32)));

        surface.center = None;
        update(&mut model, &mut surface, &AppMessage::SetManual { x: 1.0, y: 1.0 });
        assert_eq!(surface.center, None);
    }

    #[test]
    fn huge_bookmark_cell_and_far_pointer_do_not_panic() {
        let (mut model, mut surface) =
            setup(vec![BookmarkRecord::new("A", "M1", 100_000_000, 1)]);
        calibrate(&mut model, &mut surface, 1, 1);

        update(&mut model, &mut surface, &AppMessage::SelectBookmark(Some(0)));
        assert_eq!(surface.highlight, Some((i32::MAX - 32, 1024 - 32)));
        assert_eq!(
            model.outputs.bookmark.as_ref().map(|b| b.grid),
            Some(GridCoordinate { tx: 100_000_000.0, ty: 1.0 })
        );

        update(&mut model, &mut surface, &AppMessage::Hover { x: 1e12, y: 0.0 });
        assert_eq!(surface.highlight, Some((i32::MAX, -1)));

        update(&mut model, &mut surface, &AppMessage::Mark { x: -1e12, y: 1e12 });
        assert_eq!(surface.selected, Some((i32::MIN, i32::MAX - 1)));
        assert!(model.outputs.selection.is_some());
    }

    #[test]
    fn reset_zoom_reaches_surface() {
        let (mut model, mut surface) = setup(Vec::new());
        update(&mut model, &mut surface, &AppMessage::ResetZoom);
        assert_eq!(surface.zoom_resets, 1);
    }
}
