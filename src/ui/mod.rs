// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/mod.rs
//
// Headless user interface: text panel and command shell.

pub mod panel;
pub mod shell;
