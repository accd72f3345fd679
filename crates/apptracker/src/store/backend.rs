//! Persistence backends for the application store.
//!
//! A backend moves the whole collection at once: there is no incremental
//! write path, and every save replaces everything that was stored before.

use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::application::CollegeApplication;
use crate::error::{Error, Result};

/// Whole-collection load/save.
pub trait Persistence: fmt::Debug {
    /// Human-readable description of where records live.
    fn location(&self) -> String;

    /// Load the full collection.
    ///
    /// A missing backing store is the first-run state and yields an empty
    /// collection rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored data exists but cannot be read or parsed.
    fn load(&self) -> Result<Vec<CollegeApplication>>;

    /// Replace the stored collection with `applications`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be written.
    fn save(&mut self, applications: &[CollegeApplication]) -> Result<()>;

    /// Keep a copy of whatever is currently stored before it is replaced.
    ///
    /// Called once before the first save over data that failed to load.
    /// Returns where the copy went, or `None` if there was nothing to keep.
    ///
    /// # Errors
    ///
    /// Returns an error if the copy could not be made.
    fn preserve_unreadable(&mut self) -> Result<Option<String>> {
        Ok(None)
    }
}

/// A single JSON file holding the collection as an array.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the file at `path`. Nothing is touched on disk yet.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling path holding a copy of a data file that failed to load.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        self.sibling_path(".bak")
    }

    /// Sibling path used while a save is in flight.
    fn temp_path(&self) -> PathBuf {
        self.sibling_path(".tmp")
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("apptracker"), OsString::from);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn write_replacing(&self, contents: &[u8]) -> io::Result<()> {
        let tmp_path = self.temp_path();
        {
            let mut file = fs::File::create(&tmp_path)?;
            file.write_all(contents)?;
            file.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)
    }
}

impl Persistence for JsonFileBackend {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Vec<CollegeApplication>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No data file at {}, starting empty", self.path.display());
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(Error::StoreRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let applications: Vec<CollegeApplication> =
            serde_json::from_slice(&bytes).map_err(|source| Error::StoreCorrupt {
                path: self.path.clone(),
                source,
            })?;

        info!(
            "Loaded {} applications from {}",
            applications.len(),
            self.path.display()
        );
        Ok(applications)
    }

    fn save(&mut self, applications: &[CollegeApplication]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_vec_pretty(applications)?;
        self.write_replacing(&json)
            .map_err(|source| Error::StoreWrite {
                path: self.path.clone(),
                source,
            })?;

        debug!(
            "Saved {} applications to {}",
            applications.len(),
            self.path.display()
        );
        Ok(())
    }

    fn preserve_unreadable(&mut self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        fs::copy(&self.path, &backup).map_err(|source| Error::StoreWrite {
            path: backup.clone(),
            source,
        })?;
        Ok(Some(backup.display().to_string()))
    }
}

/// In-process backend holding the serialized collection in memory.
///
/// Data goes through the same JSON encoding as the file backend, so
/// corrupt contents and failed saves can be simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    contents: Option<String>,
    backup: Option<String>,
    fail_saves: bool,
    saves: usize,
}

impl MemoryBackend {
    /// An empty backend, equivalent to a first run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-populated with raw serialized `contents`.
    #[must_use]
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Some(contents.into()),
            ..Self::default()
        }
    }

    /// Make every subsequent save fail.
    #[must_use]
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Raw serialized contents, if anything has been stored.
    #[must_use]
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Contents set aside by [`Persistence::preserve_unreadable`].
    #[must_use]
    pub fn backup(&self) -> Option<&str> {
        self.backup.as_deref()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl Persistence for MemoryBackend {
    fn location(&self) -> String {
        ":memory:".to_string()
    }

    fn load(&self) -> Result<Vec<CollegeApplication>> {
        match &self.contents {
            None => Ok(Vec::new()),
            Some(text) => serde_json::from_str(text).map_err(|source| Error::StoreCorrupt {
                path: PathBuf::from(":memory:"),
                source,
            }),
        }
    }

    fn save(&mut self, applications: &[CollegeApplication]) -> Result<()> {
        if self.fail_saves {
            return Err(Error::StoreWrite {
                path: PathBuf::from(":memory:"),
                source: io::Error::other("saves disabled"),
            });
        }
        self.contents = Some(serde_json::to_string(applications)?);
        self.saves += 1;
        Ok(())
    }

    fn preserve_unreadable(&mut self) -> Result<Option<String>> {
        self.backup.clone_from(&self.contents);
        Ok(self.backup.as_ref().map(|_| ":memory:.bak".to_string()))
    }
}
