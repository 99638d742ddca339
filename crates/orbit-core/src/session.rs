//! Async driver for the [`Explorer`] store.
//!
//! A [`Session`] owns the explorer and a shared [`Platform`]. Commands that
//! need the platform spawn a tokio task; the task reports back with a
//! [`Message`] over an unbounded channel, and the frontend's event loop feeds
//! each message to [`Session::handle`]. All state mutation happens on the
//! task that owns the session, so there is no locking around the store.
//!
//! Directory results carry their [`LoadRequest`] ticket and are committed
//! only while that ticket is current. Superseded fetches are also aborted,
//! but correctness does not depend on the abort landing.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::AbortHandle;

use crate::config::settings::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::{Command, Event};
use crate::fs::entry::Entry;
use crate::load::{LoadRequest, LoadState};
use crate::nav::locations::{CustomLocation, LocationWrite};
use crate::optimistic::Settled;
use crate::platform::{Platform, WellKnownDir};
use crate::state::{Activation, Explorer, Notice};

/// Results sent from background tasks to the session.
#[derive(Debug)]
pub enum Message {
    DirectoryLoaded {
        request: LoadRequest,
        outcome: Result<Vec<Entry>, String>,
    },
    HomeResolved {
        result: CoreResult<String>,
        /// Resolved for startup rather than an explicit `GoHome`.
        at_startup: bool,
    },
    WellKnownResolved {
        dir: WellKnownDir,
        result: CoreResult<String>,
    },
    OpenFinished {
        path: String,
        result: CoreResult<()>,
    },
    LocationsLoaded(CoreResult<Vec<CustomLocation>>),
    LocationsSaved {
        write: LocationWrite,
        result: CoreResult<()>,
    },
}

pub struct Session {
    explorer: Explorer,
    platform: Arc<dyn Platform>,
    tx: UnboundedSender<Message>,
    load_timeout: Option<Duration>,
    start_dir: Option<String>,
    in_flight: Option<AbortHandle>,
    started: bool,
}

impl Session {
    /// Creates a session and the receiver its background tasks report to.
    pub fn new(platform: Arc<dyn Platform>, config: &Config) -> (Self, UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let session = Self {
            explorer: Explorer::new(config.view_state(), config.general.show_hidden),
            platform,
            tx,
            load_timeout: config.loading.timeout(),
            start_dir: config.general.start_dir.clone(),
            in_flight: None,
            started: false,
        };
        (session, rx)
    }

    /// Overrides the directory fetch timeout. `None` waits forever.
    pub fn with_load_timeout(self, load_timeout: Option<Duration>) -> Self {
        Self {
            load_timeout,
            ..self
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    /// One-time startup: load saved locations and open the first directory.
    ///
    /// The first directory is `general.start_dir` if configured, otherwise
    /// the platform's home directory. Later calls do nothing.
    pub fn start(&mut self) -> Vec<Event> {
        if self.started {
            return Vec::new();
        }
        self.started = true;

        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = platform.load_locations().await;
            let _ = tx.send(Message::LocationsLoaded(result));
        });

        match self.start_dir.take() {
            Some(dir) => {
                let event = self.load(|e| e.navigate(&dir));
                self.finish(event)
            }
            None => {
                self.spawn_home(true);
                Vec::new()
            }
        }
    }

    /// Applies a user command.
    pub fn dispatch(&mut self, command: Command) -> Vec<Event> {
        let event = match command {
            Command::Navigate(path) => self.load(|e| e.navigate(&path)),
            Command::GoBack => self.load(Explorer::go_back),
            Command::GoForward => self.load(Explorer::go_forward),
            Command::GoUp => self.load(Explorer::go_up),
            Command::Refresh => self.load(Explorer::refresh),
            Command::Rescan => self.load(Explorer::rescan),
            Command::GoHome => {
                self.spawn_home(false);
                None
            }
            Command::GoToWellKnown(dir) => {
                self.spawn_well_known(dir);
                None
            }
            Command::Select(name) => match self.explorer.find_entry(&name).cloned() {
                Some(entry) => {
                    self.explorer.view_mut().select(entry);
                    Some(Event::ViewChanged)
                }
                None => {
                    self.explorer
                        .push_notice(Notice::warning(format!("no entry named {name}")));
                    None
                }
            },
            Command::Activate(name) => match self.explorer.find_entry(&name).cloned() {
                Some(entry) => self.activate(&entry),
                None => {
                    self.explorer
                        .push_notice(Notice::warning(format!("no entry named {name}")));
                    None
                }
            },
            Command::ToggleInspector => {
                self.explorer.view_mut().toggle_inspector();
                Some(Event::ViewChanged)
            }
            Command::ToggleHidden => {
                self.explorer.toggle_hidden();
                Some(Event::ViewChanged)
            }
            Command::SetViewMode(mode) => {
                self.explorer.view_mut().set_mode(mode);
                Some(Event::ViewChanged)
            }
            Command::SetItemSize(size) => {
                self.explorer.view_mut().set_item_size(size);
                Some(Event::ViewChanged)
            }
            Command::SetGap(gap) => {
                self.explorer.view_mut().set_gap(gap);
                Some(Event::ViewChanged)
            }
            Command::AddLocation(location) => {
                let write = self.explorer.locations_mut().begin_add(location);
                write.map(|w| self.spawn_save(w))
            }
            Command::RemoveLocation(path) => {
                let write = self.explorer.locations_mut().begin_remove(&path);
                write.map(|w| self.spawn_save(w))
            }
        };
        self.finish(event)
    }

    /// Applies a background task result.
    pub fn handle(&mut self, message: Message) -> Vec<Event> {
        let event = match message {
            Message::DirectoryLoaded { request, outcome } => {
                if self.explorer.finish_load(&request, outcome) {
                    self.in_flight = None;
                    self.load_outcome_event()
                } else {
                    None
                }
            }
            Message::HomeResolved { result, at_startup } => match result {
                Ok(_) if at_startup && !self.explorer.history().is_empty() => {
                    tracing::debug!("user navigated before home resolved, staying put");
                    None
                }
                Ok(home) => self.load(|e| e.navigate(&home)),
                Err(e) => {
                    tracing::error!("failed to resolve home directory: {e}");
                    self.explorer
                        .push_notice(Notice::error("failed to load home directory"));
                    None
                }
            },
            Message::WellKnownResolved { dir, result } => match result {
                Ok(path) => self.load(|e| e.navigate(&path)),
                Err(e) => {
                    tracing::warn!("failed to resolve {}: {e}", dir.folder_name());
                    self.explorer.push_notice(Notice::error(format!(
                        "could not find {}: {e}",
                        dir.folder_name()
                    )));
                    None
                }
            },
            Message::OpenFinished { path, result } => {
                if let Err(e) = result {
                    self.explorer.open_failed(&path, &e.to_string());
                }
                None
            }
            Message::LocationsLoaded(result) => self
                .explorer
                .locations_mut()
                .apply_loaded(result)
                .then_some(Event::LocationsChanged),
            Message::LocationsSaved { write, result } => {
                match self.explorer.locations_mut().settle(write, result) {
                    Settled::RolledBack => {
                        self.explorer.push_notice(Notice::warning(
                            "could not save locations; the change was reverted",
                        ));
                        Some(Event::LocationsChanged)
                    }
                    Settled::Committed | Settled::Superseded => None,
                }
            }
        };
        self.finish(event)
    }

    fn load(&mut self, step: impl FnOnce(&mut Explorer) -> Option<LoadRequest>) -> Option<Event> {
        let request = step(&mut self.explorer)?;
        Some(self.spawn_load(request))
    }

    fn activate(&mut self, entry: &Entry) -> Option<Event> {
        match self.explorer.activate(entry) {
            Activation::Navigate(request) => Some(self.spawn_load(request)),
            Activation::Open(path) => {
                self.spawn_open(path);
                None
            }
            Activation::None => None,
        }
    }

    fn load_outcome_event(&self) -> Option<Event> {
        match self.explorer.load_state() {
            LoadState::Loaded { path, entries } => Some(Event::DirectoryLoaded {
                path: path.clone(),
                count: entries.len(),
            }),
            LoadState::Failed { path, reason } => Some(Event::LoadFailed {
                path: path.clone(),
                reason: reason.clone(),
            }),
            LoadState::Idle | LoadState::Loading { .. } => None,
        }
    }

    /// Appends pending notices to `event`.
    fn finish(&mut self, event: Option<Event>) -> Vec<Event> {
        let mut events: Vec<Event> = event.into_iter().collect();
        events.extend(self.explorer.take_notices().into_iter().map(Event::Notice));
        events
    }

    fn spawn_load(&mut self, request: LoadRequest) -> Event {
        if let Some(previous) = self.in_flight.take() {
            previous.abort();
        }
        let path = request.path().to_string();
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        let limit = self.load_timeout;
        let handle = tokio::spawn(async move {
            let fetch = platform.list_directory(request.path());
            let result = match limit {
                Some(limit) => tokio::time::timeout(limit, fetch)
                    .await
                    .unwrap_or(Err(CoreError::TimedOut(limit))),
                None => fetch.await,
            };
            let outcome = result.map_err(|e| e.to_string());
            let _ = tx.send(Message::DirectoryLoaded { request, outcome });
        });
        self.in_flight = Some(handle.abort_handle());
        Event::Loading { path }
    }

    fn spawn_home(&self, at_startup: bool) {
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = platform.home_directory().await;
            let _ = tx.send(Message::HomeResolved { result, at_startup });
        });
    }

    fn spawn_well_known(&self, dir: WellKnownDir) {
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = platform.well_known_directory(dir).await;
            let _ = tx.send(Message::WellKnownResolved { dir, result });
        });
    }

    fn spawn_open(&self, path: String) {
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = platform.open_entry(&path).await;
            let _ = tx.send(Message::OpenFinished { path, result });
        });
    }

    fn spawn_save(&self, write: LocationWrite) -> Event {
        let platform = Arc::clone(&self.platform);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = platform.save_locations(write.value()).await;
            let _ = tx.send(Message::LocationsSaved { write, result });
        });
        Event::LocationsChanged
    }
}
