//! Scripted [`Platform`] used by the async tests.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::Entry;
use crate::nav::locations::CustomLocation;
use crate::platform::{Platform, WellKnownDir};

#[derive(Default)]
pub(crate) struct FakePlatform {
    dirs: Mutex<HashMap<String, Vec<Entry>>>,
    gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    save_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    failing_saves: Mutex<Vec<String>>,
    well_known: Mutex<HashMap<WellKnownDir, String>>,
    home: Option<String>,
    saved: Option<Vec<CustomLocation>>,
    fail_saves: AtomicBool,
    fail_open: AtomicBool,
    saves: Mutex<Vec<Vec<CustomLocation>>>,
    opened: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            saved: Some(Vec::new()),
            ..Self::default()
        }
    }

    pub fn with_dir(self, path: &str, names: &[&str]) -> Self {
        let entries = names
            .iter()
            .map(|name| {
                let child = format!("{}/{name}", path.trim_end_matches('/'));
                if name.ends_with('/') {
                    let name = name.trim_end_matches('/');
                    Entry::directory(child.trim_end_matches('/'), name)
                } else {
                    Entry::file(child, *name)
                }
            })
            .collect();
        self.dirs
            .lock()
            .unwrap()
            .insert(path.to_string(), entries);
        self
    }

    pub fn with_home(self, home: &str) -> Self {
        Self {
            home: Some(home.to_string()),
            ..self
        }
    }

    pub fn with_saved(self, saved: Option<Vec<CustomLocation>>) -> Self {
        Self { saved, ..self }
    }

    pub fn with_well_known(self, dir: WellKnownDir, path: &str) -> Self {
        self.well_known
            .lock()
            .unwrap()
            .insert(dir, path.to_string());
        self
    }

    /// Makes the next listing of `path` wait until the returned sender fires
    /// (or is dropped).
    pub fn hold(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    /// Holds the save whose newest location is `path` until the sender fires.
    pub fn hold_save_of(&self, path: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.save_gates.lock().unwrap().insert(path.to_string(), rx);
        tx
    }

    /// Fails only the save whose newest location is `path`.
    pub fn fail_save_of(&self, path: &str) {
        self.failing_saves.lock().unwrap().push(path.to_string());
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn fail_open(&self, fail: bool) {
        self.fail_open.store(fail, Ordering::SeqCst);
    }

    pub fn saves(&self) -> Vec<Vec<CustomLocation>> {
        self.saves.lock().unwrap().clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

#[async_trait]
impl Platform for FakePlatform {
    async fn list_directory(&self, path: &str) -> CoreResult<Vec<Entry>> {
        let gate = self.gates.lock().unwrap().remove(path);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let listing = self.dirs.lock().unwrap().get(path).cloned();
        listing.ok_or_else(|| CoreError::NotFound(PathBuf::from(path)))
    }

    async fn home_directory(&self) -> CoreResult<String> {
        self.home
            .clone()
            .ok_or_else(|| CoreError::Platform("HOME is not set".into()))
    }

    async fn open_entry(&self, path: &str) -> CoreResult<()> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(CoreError::Platform("no handler".into()));
        }
        self.opened.lock().unwrap().push(path.to_string());
        Ok(())
    }

    async fn load_locations(&self) -> CoreResult<Vec<CustomLocation>> {
        self.saved
            .clone()
            .ok_or_else(|| CoreError::ConfigParse("corrupt locations file".into()))
    }

    async fn save_locations(&self, locations: &[CustomLocation]) -> CoreResult<()> {
        let newest = locations.last().map(|l| l.path.clone()).unwrap_or_default();
        let gate = self.save_gates.lock().unwrap().remove(&newest);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        let targeted = self.failing_saves.lock().unwrap().contains(&newest);
        if targeted || self.fail_saves.load(Ordering::SeqCst) {
            return Err(CoreError::Platform("disk full".into()));
        }
        self.saves.lock().unwrap().push(locations.to_vec());
        Ok(())
    }

    async fn well_known_directory(&self, dir: WellKnownDir) -> CoreResult<String> {
        let path = self.well_known.lock().unwrap().get(&dir).cloned();
        path.ok_or(CoreError::Unsupported("well_known_directory"))
    }
}
