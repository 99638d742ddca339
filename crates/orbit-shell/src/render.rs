//! Plain-text rendering of the explorer state.

use std::fmt::Write;

use orbit_core::{Entry, Event, Explorer, LoadState, Notice, NoticeLevel, ViewMode};

/// Terminal width the grid layout packs columns into.
const GRID_WIDTH: u32 = 80;

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}

fn display_name(entry: &Entry) -> String {
    if entry.is_dir() {
        format!("{}/", entry.name())
    } else {
        entry.name().to_string()
    }
}

/// Header line: current path plus history affordances.
pub fn header(explorer: &Explorer) -> String {
    let path = explorer.current_path().unwrap_or("(nowhere)");
    let back = if explorer.can_go_back() { "<" } else { " " };
    let forward = if explorer.can_go_forward() { ">" } else { " " };
    let hidden = if explorer.show_hidden() { " [hidden shown]" } else { "" };
    format!("{back}{forward} {path}{hidden}")
}

/// The current listing in the configured layout.
pub fn listing(explorer: &Explorer) -> String {
    let mut out = header(explorer);
    out.push('\n');

    match explorer.load_state() {
        LoadState::Idle => out.push_str("  (no directory)\n"),
        LoadState::Loading { .. } => out.push_str("  loading...\n"),
        LoadState::Failed { reason, .. } => {
            let _ = writeln!(out, "  error: {reason}");
        }
        LoadState::Loaded { .. } => {
            let entries = explorer.visible_entries();
            if entries.is_empty() {
                out.push_str("  (empty)\n");
            } else {
                let selected = explorer.view().selected().map(Entry::path);
                match explorer.view().mode() {
                    ViewMode::List => list_rows(&mut out, &entries, selected),
                    ViewMode::Grid => grid_rows(&mut out, explorer, &entries, selected),
                }
            }
        }
    }

    if let Some(entry) = explorer.view().inspected() {
        out.push_str(&inspector(entry));
    }
    out
}

fn marker(entry: &Entry, selected: Option<&str>) -> char {
    if selected == Some(entry.path()) {
        '*'
    } else {
        ' '
    }
}

fn list_rows(out: &mut String, entries: &[&Entry], selected: Option<&str>) {
    for entry in entries {
        let size = entry.size().map(format_size).unwrap_or_default();
        let kind = if entry.is_dir() { "dir" } else { entry.file_type() };
        let _ = writeln!(
            out,
            "{} {:<40} {:>10}  {}",
            marker(entry, selected),
            display_name(entry),
            size,
            kind
        );
    }
}

fn grid_rows(out: &mut String, explorer: &Explorer, entries: &[&Entry], selected: Option<&str>) {
    let view = explorer.view();
    let cell = (view.item_size() + view.gap()) / 4;
    let cell = cell.max(8) as usize;
    let columns = (GRID_WIDTH as usize / cell).max(1);

    for row in entries.chunks(columns) {
        let mut line = String::new();
        for entry in row {
            let mut name = display_name(entry);
            if name.chars().count() >= cell - 1 {
                name = name.chars().take(cell.saturating_sub(3)).collect::<String>() + "~";
            }
            let _ = write!(line, "{}{:<width$}", marker(entry, selected), name, width = cell - 1);
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
}

/// Detail block for the inspected entry.
pub fn inspector(entry: &Entry) -> String {
    let mut out = String::from("--- inspector ---\n");
    let _ = writeln!(out, "name:     {}", entry.name());
    let _ = writeln!(out, "path:     {}", entry.path());
    if entry.is_dir() {
        out.push_str("kind:     directory\n");
    } else {
        let kind = if entry.file_type().is_empty() {
            "file"
        } else {
            entry.file_type()
        };
        let _ = writeln!(out, "kind:     {kind}");
    }
    if let Some(size) = entry.size() {
        let _ = writeln!(out, "size:     {}", format_size(size));
    }
    if let Some(modified) = entry.modified() {
        let _ = writeln!(out, "modified: {modified}");
    }
    out
}

/// Saved locations, one per line.
pub fn places(explorer: &Explorer) -> String {
    let locations = explorer.locations();
    if locations.is_empty() {
        return "no saved locations\n".to_string();
    }
    let mut out = String::new();
    for location in locations.iter() {
        let _ = writeln!(out, "  {:<20} {}", location.label, location.path);
    }
    out
}

pub fn notice(notice: &Notice) -> String {
    let tag = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Warning => "warning",
        NoticeLevel::Error => "error",
    };
    format!("[{tag}] {}", notice.message)
}

/// One-line status for events that are not redrawn as a listing.
pub fn event_line(event: &Event) -> Option<String> {
    match event {
        Event::Loading { path } => Some(format!("loading {path}...")),
        Event::Notice(n) => Some(notice(n)),
        Event::DirectoryLoaded { .. }
        | Event::LoadFailed { .. }
        | Event::ViewChanged
        | Event::LocationsChanged => None,
    }
}
