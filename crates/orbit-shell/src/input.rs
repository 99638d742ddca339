//! Line input parsing.
//!
//! Translates one line typed at the prompt into an [`InputAction`]: either a
//! core [`Command`] or something the shell handles itself.

use anyhow::{anyhow, bail};
use orbit_core::{Command, CustomLocation, ViewMode, WellKnownDir};

/// Result of parsing a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    /// Dispatch a core Command.
    Command(Command),
    /// Print the current listing.
    List,
    /// Print the saved locations.
    Places,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

pub const HELP: &str = "\
commands:
  cd [path]             go to path (home when omitted)
  back | forward | up   move through history or to the parent
  home                  go to the home directory
  goto <folder>         documents, downloads or movies
  refresh               reload the current directory
  ls                    show the listing
  open <name>           enter a directory or open a file
  select <name>         select an entry
  inspect               toggle the inspector
  hidden                toggle hidden entries
  view grid|list        change layout
  size <n> | gap <n>    change item size or gap
  add <path> [label]    save a location
  remove <path>         delete a saved location
  places                list saved locations
  help | quit";

/// Splits `line` into the command word and the trimmed remainder.
fn split_word(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    }
}

fn required<'a>(word: &str, arg: &'a str, what: &str) -> anyhow::Result<&'a str> {
    if arg.is_empty() {
        bail!("{word}: missing {what}");
    }
    Ok(arg)
}

fn number(word: &str, arg: &str) -> anyhow::Result<u32> {
    required(word, arg, "number")?
        .parse()
        .map_err(|_| anyhow!("{word}: not a number: {arg}"))
}

/// Parses one input line.
///
/// # Errors
///
/// Returns an error describing the problem for unknown commands or bad
/// arguments.
pub fn parse_line(line: &str) -> anyhow::Result<InputAction> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(InputAction::Nothing);
    }
    let (word, arg) = split_word(line);

    let command = match word {
        "cd" if arg.is_empty() => Command::GoHome,
        "cd" => Command::Navigate(arg.to_string()),
        "back" => Command::GoBack,
        "forward" => Command::GoForward,
        "up" => Command::GoUp,
        "home" => Command::GoHome,
        "refresh" => Command::Refresh,
        "goto" => {
            let name = required(word, arg, "folder")?;
            let dir = WellKnownDir::parse(name)
                .ok_or_else(|| anyhow!("goto: unknown folder: {name}"))?;
            Command::GoToWellKnown(dir)
        }
        "open" => Command::Activate(required(word, arg, "name")?.to_string()),
        "select" => Command::Select(required(word, arg, "name")?.to_string()),
        "inspect" => Command::ToggleInspector,
        "hidden" => Command::ToggleHidden,
        "view" => match arg {
            "grid" => Command::SetViewMode(ViewMode::Grid),
            "list" => Command::SetViewMode(ViewMode::List),
            _ => bail!("view: expected grid or list"),
        },
        "size" => Command::SetItemSize(number(word, arg)?),
        "gap" => Command::SetGap(number(word, arg)?),
        "add" => {
            let (path, label) = split_word(required(word, arg, "path")?);
            let location = if label.is_empty() {
                CustomLocation::from_path(path)
            } else {
                CustomLocation::new(path, label)
            };
            Command::AddLocation(location)
        }
        "remove" => Command::RemoveLocation(required(word, arg, "path")?.to_string()),
        "ls" => return Ok(InputAction::List),
        "places" => return Ok(InputAction::Places),
        "help" | "?" => return Ok(InputAction::Help),
        "quit" | "exit" | "q" => return Ok(InputAction::Quit),
        other => bail!("unknown command: {other} (try `help`)"),
    };
    Ok(InputAction::Command(command))
}
