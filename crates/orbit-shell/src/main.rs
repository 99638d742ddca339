//! Orbit: a line-oriented file browser shell.
//!
//! Reads commands from stdin, drives an `orbit_core::Session` backed by the
//! local filesystem, and prints the listing whenever it changes. Logs go to
//! a file so they never interleave with the prompt.

mod input;
mod platform;
mod render;
mod watcher;

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use orbit_core::config::settings::LogConfig;
use orbit_core::{Command, Config, Event, LoadState, Message, Session};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::input::{parse_line, InputAction, HELP};
use crate::platform::{config_dir, default_locations_file, LocalPlatform};
use crate::watcher::{DirWatcher, WatchMessage};

fn init_logging(log: &LogConfig) -> anyhow::Result<()> {
    let path = log
        .file
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("orbit.log"));
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;
    let level = log.level.parse().unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn prompt() {
    print!("orbit> ");
    let _ = std::io::stdout().flush();
}

/// Prints what changed. The listing is redrawn at most once per batch.
fn show(session: &Session, events: &[Event]) {
    let mut redraw = false;
    for event in events {
        if let Some(line) = render::event_line(event) {
            println!("{line}");
        }
        redraw |= matches!(
            event,
            Event::DirectoryLoaded { .. } | Event::LoadFailed { .. } | Event::ViewChanged
        );
    }
    if redraw {
        print!("{}", render::listing(session.explorer()));
    }
}

/// Points the watcher at the loaded directory, if it moved.
fn follow(watcher: &mut Option<DirWatcher>, session: &Session) {
    let Some(w) = watcher.as_mut() else {
        return;
    };
    if let LoadState::Loaded { path, .. } = session.explorer().load_state() {
        let dir = Path::new(path);
        if w.current_dir().as_deref() == Some(dir) {
            return;
        }
        if let Err(e) = w.watch(dir) {
            tracing::warn!("cannot watch {path}: {e}");
        }
    }
}

/// Whether `dir` is the listing currently on screen.
fn is_loaded(session: &Session, dir: &Path) -> bool {
    matches!(
        session.explorer().load_state(),
        LoadState::Loaded { path, .. } if Path::new(path) == dir
    )
}

async fn run(mut session: Session, mut rx: UnboundedReceiver<Message>) -> anyhow::Result<()> {
    let (watch_tx, mut watch_rx) = mpsc::unbounded_channel::<WatchMessage>();
    let mut dir_watcher = match DirWatcher::new(watch_tx) {
        Ok(w) => Some(w),
        Err(e) => {
            tracing::warn!("directory watching disabled: {e}");
            None
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let events = session.start();
    show(&session, &events);
    prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    println!();
                    break;
                };
                match parse_line(&line) {
                    Ok(InputAction::Command(command)) => {
                        let events = session.dispatch(command);
                        show(&session, &events);
                    }
                    Ok(InputAction::List) => print!("{}", render::listing(session.explorer())),
                    Ok(InputAction::Places) => print!("{}", render::places(session.explorer())),
                    Ok(InputAction::Help) => println!("{HELP}"),
                    Ok(InputAction::Quit) => break,
                    Ok(InputAction::Nothing) => {}
                    Err(e) => println!("{e}"),
                }
                prompt();
            }
            Some(message) = rx.recv() => {
                let events = session.handle(message);
                if !events.is_empty() {
                    println!();
                    show(&session, &events);
                    prompt();
                }
            }
            Some(message) = watch_rx.recv() => match message {
                WatchMessage::Changed(dir) => {
                    if is_loaded(&session, &dir) {
                        tracing::debug!("{} changed on disk, rescanning", dir.display());
                        let events = session.dispatch(Command::Rescan);
                        if !events.is_empty() {
                            println!();
                            show(&session, &events);
                            prompt();
                        }
                    } else {
                        tracing::debug!("ignoring change in {}", dir.display());
                    }
                }
                WatchMessage::Error(e) => tracing::warn!("watch error: {e}"),
            },
        }
        follow(&mut dir_watcher, &session);
    }

    tracing::info!("shutting down");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = config_dir().join("config.toml");
    let mut config = Config::load_or_default(&config_path)?;

    init_logging(&config.log)?;
    tracing::info!("loaded config from {}", config_path.display());

    // An explicit start directory on the command line wins over the config.
    if let Some(arg) = std::env::args().nth(1) {
        let dir = std::fs::canonicalize(&arg).unwrap_or_else(|_| PathBuf::from(&arg));
        config.general.start_dir = Some(dir.to_string_lossy().into_owned());
    }

    let locations_file = config
        .storage
        .locations_file
        .clone()
        .unwrap_or_else(default_locations_file);
    let platform = Arc::new(LocalPlatform::new(locations_file));
    let (session, rx) = Session::new(platform, &config);

    run(session, rx).await
}
