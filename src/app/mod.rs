// SPDX-License-Identifier: GPL-3.0-or-later
// src/app/mod.rs
//
// Controller: model, messages, update loop and the rendering seam.

pub mod message;
pub mod model;
pub mod surface;
pub mod update;

pub use message::AppMessage;
pub use model::AppModel;
