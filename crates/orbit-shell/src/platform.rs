//! [`Platform`] implementation backed by the local filesystem.
//!
//! Listings come from `tokio::fs`, files are opened with the desktop's
//! launcher (`open` on macOS, `xdg-open` elsewhere), and saved locations
//! live in a JSON file under `~/.config/orbit`.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use async_trait::async_trait;
use orbit_core::{CoreError, CoreResult, CustomLocation, Entry, Platform, WellKnownDir};
use unicode_normalization::UnicodeNormalization;

/// Returns `$HOME/.config/orbit`, or `/.config/orbit` if `HOME` is unset.
pub fn config_dir() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("orbit")
}

/// Returns the default path of the saved locations file.
pub fn default_locations_file() -> PathBuf {
    config_dir().join("locations.json")
}

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames decomposed, which makes Hangul and accented names
/// compare unequal to what the user types.
fn nfc(s: &str) -> String {
    s.nfc().collect()
}

fn map_io(path: &Path, e: std::io::Error) -> CoreError {
    match e.kind() {
        std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
        std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
        _ => CoreError::Io(e),
    }
}

/// Lowercased extension, or empty for extensionless files.
fn file_type_of(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

fn entry_from(path: &Path, name: &str, metadata: &std::fs::Metadata) -> Entry {
    let path_str = nfc(&path.to_string_lossy());
    let name = nfc(name);
    let entry = if metadata.is_dir() {
        Entry::directory(path_str, name)
    } else {
        Entry::file(path_str, name)
            .with_file_type(file_type_of(path))
            .with_size(metadata.len())
    };
    let modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .and_then(|d| i64::try_from(d.as_secs()).ok());
    match modified {
        Some(secs) => entry.with_modified(secs),
        None => entry,
    }
}

#[derive(Debug, Clone)]
pub struct LocalPlatform {
    home: Option<PathBuf>,
    locations_file: PathBuf,
}

impl LocalPlatform {
    /// Creates a platform reading `HOME` from the environment.
    pub fn new(locations_file: PathBuf) -> Self {
        Self {
            home: std::env::var_os("HOME").map(PathBuf::from),
            locations_file,
        }
    }

    /// Overrides the home directory.
    pub fn with_home(self, home: Option<PathBuf>) -> Self {
        Self { home, ..self }
    }

    fn home(&self) -> CoreResult<&Path> {
        self.home
            .as_deref()
            .ok_or_else(|| CoreError::Platform("HOME is not set".into()))
    }
}

#[async_trait]
impl Platform for LocalPlatform {
    async fn list_directory(&self, path: &str) -> CoreResult<Vec<Entry>> {
        let dir = Path::new(path);
        let metadata = tokio::fs::metadata(dir).await.map_err(|e| map_io(dir, e))?;
        if !metadata.is_dir() {
            return Err(CoreError::NotADirectory(dir.to_path_buf()));
        }

        let mut read_dir = tokio::fs::read_dir(dir).await.map_err(|e| map_io(dir, e))?;
        let mut entries = Vec::new();
        while let Some(dir_entry) = read_dir.next_entry().await.map_err(|e| map_io(dir, e))? {
            // Entries that vanish mid-listing are skipped.
            let Ok(metadata) = dir_entry.metadata().await else {
                continue;
            };
            let name = dir_entry.file_name().to_string_lossy().into_owned();
            entries.push(entry_from(&dir_entry.path(), &name, &metadata));
        }
        entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name().cmp(b.name())));
        tracing::debug!("listed {} entries in {path}", entries.len());
        Ok(entries)
    }

    async fn home_directory(&self) -> CoreResult<String> {
        Ok(self.home()?.to_string_lossy().into_owned())
    }

    async fn open_entry(&self, path: &str) -> CoreResult<()> {
        let launcher = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        let status = tokio::process::Command::new(launcher)
            .arg(path)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await
            .map_err(|e| CoreError::Platform(format!("{launcher}: {e}")))?;
        if status.success() {
            Ok(())
        } else {
            Err(CoreError::Platform(format!("{launcher} exited with {status}")))
        }
    }

    async fn load_locations(&self) -> CoreResult<Vec<CustomLocation>> {
        let content = match tokio::fs::read_to_string(&self.locations_file).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(&self.locations_file, e)),
        };
        serde_json::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    async fn save_locations(&self, locations: &[CustomLocation]) -> CoreResult<()> {
        if let Some(parent) = self.locations_file.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(locations)
            .map_err(|e| CoreError::Platform(e.to_string()))?;
        tokio::fs::write(&self.locations_file, json)
            .await
            .map_err(|e| map_io(&self.locations_file, e))
    }

    async fn well_known_directory(&self, dir: WellKnownDir) -> CoreResult<String> {
        let path = self.home()?.join(dir.folder_name());
        let metadata = tokio::fs::metadata(&path).await.map_err(|e| map_io(&path, e))?;
        if !metadata.is_dir() {
            return Err(CoreError::NotADirectory(path));
        }
        Ok(path.to_string_lossy().into_owned())
    }
}
