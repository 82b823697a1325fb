// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/message.rs
//
// Application messages: surface events, user actions, and internal signals.

use crate::domain::bookmark::BookmarkField;

#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    // Maps / overlays.
    SelectMap(usize),
    ToggleOverlay(usize),

    // Surface events, in scene coordinates.
    Mark {
        x: f64,
        y: f64,
    },
    Hover {
        x: f64,
        y: f64,
    },
    ResetZoom,

    // Calibration.
    Calibrated {
        mx: i32,
        my: i32,
        cx: f64,
        cy: f64,
    },
    SetScaleX(usize),
    SetScaleY(usize),
    SetOffsetX(f64),
    SetOffsetY(f64),

    // Manual entry.
    SetManual {
        x: f64,
        y: f64,
    },

    // Bookmarks.
    AddBookmark,
    DeleteBookmark,
    SaveBookmarks,
    SelectBookmark(Option<usize>),
    EditBookmark {
        row: usize,
        field: BookmarkField,
        value: String,
    },

    // Errors.
    #[allow(dead_code)]
    ShowError(String),
    #[allow(dead_code)]
    ClearError,

    // Fallback.
    #[allow(dead_code)]
    NoOp,
}
