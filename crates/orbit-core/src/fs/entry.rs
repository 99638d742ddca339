//! Directory entry snapshot.

use serde::{Deserialize, Serialize};

/// Leading character that marks an entry as hidden.
pub const HIDDEN_MARKER: char = '.';

/// A single file or directory returned by a directory listing.
///
/// `Entry` is an immutable snapshot. A reload produces a whole new set of
/// entries; nothing patches an existing one. Build instances with
/// [`Entry::file`] or [`Entry::directory`] and the consuming `with_*` methods.
///
/// # Examples
///
/// ```
/// use orbit_core::Entry;
///
/// let entry = Entry::file("/home/notes.txt", "notes.txt")
///     .with_file_type("txt")
///     .with_size(12);
/// assert_eq!(entry.name(), "notes.txt");
/// assert!(!entry.is_dir());
/// assert_eq!(entry.size(), Some(12));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    name: String,
    path: String,
    is_dir: bool,
    #[serde(default)]
    file_type: String,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    modified: Option<i64>,
    #[serde(default)]
    thumbnail: Option<String>,
}

impl Entry {
    /// Creates a non-directory entry with an empty type and no size.
    pub fn file(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            is_dir: false,
            file_type: String::new(),
            size: None,
            modified: None,
            thumbnail: None,
        }
    }

    /// Creates a directory entry. Directories never carry a size.
    pub fn directory(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            is_dir: true,
            ..Self::file(path, name)
        }
    }

    /// Sets the type classifier. Ignored for directories.
    #[must_use]
    pub fn with_file_type(self, file_type: impl Into<String>) -> Self {
        if self.is_dir {
            return self;
        }
        Self {
            file_type: file_type.into(),
            ..self
        }
    }

    /// Sets the size in bytes. Ignored for directories.
    #[must_use]
    pub fn with_size(self, size: u64) -> Self {
        if self.is_dir {
            return self;
        }
        Self {
            size: Some(size),
            ..self
        }
    }

    /// Sets the last-modified time in seconds since the Unix epoch.
    #[must_use]
    pub fn with_modified(self, modified: i64) -> Self {
        Self {
            modified: Some(modified),
            ..self
        }
    }

    /// Attaches the path of a precomputed preview image.
    #[must_use]
    pub fn with_thumbnail(self, thumbnail: impl Into<String>) -> Self {
        Self {
            thumbnail: Some(thumbnail.into()),
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns the type classifier. Empty for directories.
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// Returns the size in bytes. Always `None` for directories.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn modified(&self) -> Option<i64> {
        self.modified
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    /// Returns `true` if the name starts with [`HIDDEN_MARKER`].
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with(HIDDEN_MARKER)
    }
}
