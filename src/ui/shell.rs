// SPDX-License-Identifier: GPL-3.0-or-later
// src/ui/shell.rs
//
// Line-oriented host: turns typed commands into application messages.

use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{Context, anyhow, bail};

use crate::app::surface::RenderSurface;
use crate::app::{AppMessage, AppModel, update};
use crate::constant::APP_NAME;
use crate::domain::registry::MapRegistry;
use crate::ui::panel::Panel;

pub const USAGE: &str = "\
Maps
  maps                         list maps
  map <index|name>             switch map
  overlay <index>              toggle an overlay of the current map
Map surface (scene pixels)
  mark <x> <y>                 select the cell under the pointer
  hover <x> <y>                move the highlight, show the cell
  zoom-reset                   reset the view zoom
Calibration
  calibrate <mx> <my> <cx> <cy>
  scale-x <0-3> | scale-y <0-3>   combo index: blank, 1, 2, 4
  offset-x <v>  | offset-y <v>
  manual <x> <y>               transform typed cell offsets
Bookmarks
  bookmark add | delete | save
  bookmark select <row|none>
  bookmark edit <row> <name|map|x|y> <value>
Other
  show | help | about | quit";

pub const ABOUT: &str = "\
Telescience Manager
(c) 2013-2019 by mysha, ZeWaka, et al.";

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Message(AppMessage),
    Show,
    Maps,
    Help,
    About,
    Quit,
}

fn arg<T>(args: &[&str], index: usize, what: &str) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = args.get(index).ok_or_else(|| anyhow!("missing {what}"))?;
    raw.parse().with_context(|| format!("invalid {what} `{raw}`"))
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_command(line: &str, registry: &MapRegistry) -> anyhow::Result<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let words: Vec<&str> = line.split_whitespace().collect();
    let (head, args) = (words[0], &words[1..]);

    let message = match head {
        "show" => return Ok(Some(Command::Show)),
        "maps" => return Ok(Some(Command::Maps)),
        "help" => return Ok(Some(Command::Help)),
        "about" => return Ok(Some(Command::About)),
        "quit" | "exit" => return Ok(Some(Command::Quit)),

        "map" => {
            let target = args.join(" ");
            let index = match target.parse::<usize>() {
                Ok(index) => index,
                Err(_) => registry
                    .position(&target)
                    .ok_or_else(|| anyhow!("unknown map `{target}`"))?,
            };
            AppMessage::SelectMap(index)
        }
        "overlay" => AppMessage::ToggleOverlay(arg(args, 0, "overlay index")?),
        "mark" => AppMessage::Mark {
            x: arg(args, 0, "x")?,
            y: arg(args, 1, "y")?,
        },
        "hover" => AppMessage::Hover {
            x: arg(args, 0, "x")?,
            y: arg(args, 1, "y")?,
        },
        "zoom-reset" => AppMessage::ResetZoom,

        "calibrate" => AppMessage::Calibrated {
            mx: arg(args, 0, "mx")?,
            my: arg(args, 1, "my")?,
            cx: arg(args, 2, "cx")?,
            cy: arg(args, 3, "cy")?,
        },
        "scale-x" => AppMessage::SetScaleX(arg(args, 0, "combo index")?),
        "scale-y" => AppMessage::SetScaleY(arg(args, 0, "combo index")?),
        "offset-x" => AppMessage::SetOffsetX(arg(args, 0, "offset")?),
        "offset-y" => AppMessage::SetOffsetY(arg(args, 0, "offset")?),
        "manual" => AppMessage::SetManual {
            x: arg(args, 0, "x")?,
            y: arg(args, 1, "y")?,
        },

        "bookmark" => match args.first().copied() {
            Some("add") => AppMessage::AddBookmark,
            Some("delete") => AppMessage::DeleteBookmark,
            Some("save") => AppMessage::SaveBookmarks,
            Some("select") => match args.get(1).copied() {
                Some("none") => AppMessage::SelectBookmark(None),
                _ => AppMessage::SelectBookmark(Some(arg(args, 1, "row")?)),
            },
            Some("edit") => AppMessage::EditBookmark {
                row: arg(args, 1, "row")?,
                field: args
                    .get(2)
                    .ok_or_else(|| anyhow!("missing field"))?
                    .parse()?,
                value: args.get(3..).map(|rest| rest.join(" ")).unwrap_or_default(),
            },
            Some(other) => bail!("unknown bookmark action `{other}`"),
            None => bail!("missing bookmark action"),
        },

        other => bail!("unknown command `{other}`, try `help`"),
    };

    Ok(Some(Command::Message(message)))
}

/// Read commands until end of input or `quit`, printing the panel after each change.
pub fn run<S, R, W>(
    model: &mut AppModel,
    surface: &mut S,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    S: RenderSurface,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("reading command")?;

        let command = match parse_command(&line, &model.registry) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(output, "error: {e:#}")?;
                continue;
            }
        };

        match command {
            Command::Message(message) => {
                update::update(model, surface, &message);
                write!(output, "{}", Panel(model))?;
                model.clear_error();
            }
            Command::Show => write!(output, "{}", Panel(model))?,
            Command::Maps => {
                for (i, map) in model.registry.maps().iter().enumerate() {
                    let cursor = if model.active_map == Some(i) { '>' } else { ' ' };
                    writeln!(output, "{cursor} {i:>3}  {}", map.name)?;
                }
            }
            Command::Help => writeln!(output, "{USAGE}")?,
            Command::About => writeln!(output, "{ABOUT}")?,
            Command::Quit => break,
        }
        output.flush()?;
    }

    log::debug!("{APP_NAME} shell finished");
    Ok(())
}
