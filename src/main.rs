// SPDX-License-Identifier: GPL-3.0-or-later
// src/main.rs
//
// Entry point: parse arguments, load maps and bookmarks, run the shell.

mod app;
mod config;
mod constant;
mod domain;
mod storage;
mod ui;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use crate::app::surface::HeadlessSurface;
use crate::app::{AppMessage, AppModel, update};
use crate::config::AppConfig;

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(name = "telesmap", version, about = "Telescience map manager")]
pub struct Args {
    /// Config file (defaults to the platform config directory).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Map registry, overrides the config.
    #[arg(long)]
    pub maps: Option<PathBuf>,

    /// Bookmark file, overrides the config.
    #[arg(long)]
    pub bookmarks: Option<PathBuf>,

    /// Read commands from this file instead of stdin.
    #[arg(long)]
    pub script: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = match args.config.clone().or_else(AppConfig::default_path) {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };
    if let Some(maps) = args.maps {
        config.maps_file = maps;
    }
    if let Some(bookmarks) = args.bookmarks {
        config.bookmarks_file = bookmarks;
    }

    let registry = storage::load_registry(&config.maps_file)?;
    let bookmarks = storage::load_bookmarks(&config.bookmarks_file)?;

    let mut model = AppModel::new(&config, registry, bookmarks);
    let mut surface = HeadlessSurface::new();

    if !model.registry.is_empty() {
        update::update(&mut model, &mut surface, &AppMessage::SelectMap(0));
    }

    let stdout = io::stdout();
    match args.script {
        Some(path) => {
            let file =
                File::open(&path).with_context(|| format!("opening script {}", path.display()))?;
            ui::shell::run(&mut model, &mut surface, BufReader::new(file), stdout.lock())
        }
        None => ui::shell::run(&mut model, &mut surface, io::stdin().lock(), stdout.lock()),
    }
}
