//! Watches the directory on screen so its listing follows changes on disk.
//!
//! Debounced [`notify`] events are attributed to the directory being watched
//! and reported as [`WatchMessage::Changed`] with that directory's path, the
//! same string the session loaded. Events still draining from a directory
//! the user has already left are dropped here; the main loop additionally
//! ignores a change whose path is no longer the loaded one.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use notify_debouncer_mini::{new_debouncer, DebouncedEvent, DebouncedEventKind, Debouncer};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, PartialEq, Eq)]
pub enum WatchMessage {
    /// Entries of this directory changed.
    Changed(PathBuf),
    Error(String),
}

/// The directory being watched, as loaded and as the OS reports it.
#[derive(Debug, Clone)]
struct Target {
    loaded: PathBuf,
    canonical: PathBuf,
}

impl Target {
    fn new(dir: &Path) -> Self {
        Self {
            loaded: dir.to_path_buf(),
            canonical: std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf()),
        }
    }

    /// Whether `path` is the directory itself or one of its direct entries.
    fn covers(&self, path: &Path) -> bool {
        [&self.loaded, &self.canonical]
            .into_iter()
            .any(|dir| path == dir.as_path() || path.parent() == Some(dir.as_path()))
    }
}

fn relevant_change(target: &Target, events: &[DebouncedEvent]) -> bool {
    events
        .iter()
        .filter(|e| matches!(e.kind, DebouncedEventKind::Any))
        .any(|e| target.covers(&e.path))
}

pub struct DirWatcher {
    debouncer: Debouncer<notify::RecommendedWatcher>,
    target: Arc<Mutex<Option<Target>>>,
}

impl DirWatcher {
    /// Creates a watcher that reports through `tx`. Nothing is watched yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying notify watcher cannot be initialised.
    pub fn new(tx: UnboundedSender<WatchMessage>) -> anyhow::Result<Self> {
        let target: Arc<Mutex<Option<Target>>> = Arc::new(Mutex::new(None));
        let shared = Arc::clone(&target);

        let debouncer = new_debouncer(
            Duration::from_millis(200),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    let Ok(guard) = shared.lock() else {
                        return;
                    };
                    if let Some(target) = guard.as_ref() {
                        if relevant_change(target, &events) {
                            let _ = tx.send(WatchMessage::Changed(target.loaded.clone()));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchMessage::Error(e.to_string()));
                }
            },
        )?;

        Ok(Self { debouncer, target })
    }

    /// Follows `dir`, dropping the previous directory.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` cannot be watched; nothing is watched then.
    pub fn watch(&mut self, dir: &Path) -> anyhow::Result<()> {
        let previous = self.set_target(None);
        if let Some(prev) = previous {
            let _ = self.debouncer.watcher().unwatch(&prev.loaded);
        }

        self.debouncer
            .watcher()
            .watch(dir, notify::RecursiveMode::NonRecursive)?;
        self.set_target(Some(Target::new(dir)));
        Ok(())
    }

    /// The loaded path currently followed.
    pub fn current_dir(&self) -> Option<PathBuf> {
        self.target
            .lock()
            .ok()
            .and_then(|t| t.as_ref().map(|t| t.loaded.clone()))
    }

    fn set_target(&self, next: Option<Target>) -> Option<Target> {
        match self.target.lock() {
            Ok(mut guard) => std::mem::replace(&mut *guard, next),
            Err(_) => None,
        }
    }
}
