// SPDX-License-Identifier: GPL-3.0-or-later
// src/domain/mod.rs
//
// Toolkit-independent core: calibration, selection, bookmarks, registry.

pub mod bookmark;
pub mod calibration;
pub mod recalc;
pub mod registry;
pub mod selection;
