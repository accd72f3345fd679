//! Record store for apptracker.
//!
//! [`ApplicationStore`] owns the in-memory collection and writes all of it
//! back through a [`Persistence`] backend after every mutation. It provides:
//! - Insertion-ordered add and list
//! - Case-insensitive substring search on the college name
//! - Case-insensitive exact-name delete (removes every match)
//!
//! Storage failures never reach the caller. A failed load starts the store
//! empty, and a failed save leaves the in-memory collection authoritative.
//! Both are logged. Before the first save over data that failed to load, the
//! backend is asked to keep a copy of it.

mod backend;

use std::path::Path;

use tracing::{debug, error, info, warn};

use crate::application::CollegeApplication;

pub use backend::{JsonFileBackend, MemoryBackend, Persistence};

/// Collection of tracked applications backed by a persistence layer.
///
/// Operations run to completion on the caller's thread. Mutations take
/// `&mut self`, so callers sharing a store across threads need their own lock.
#[derive(Debug)]
pub struct ApplicationStore<P: Persistence = JsonFileBackend> {
    backend: P,
    applications: Vec<CollegeApplication>,
    load_failed: bool,
    unreadable_pending: bool,
    last_save_failed: bool,
}

impl ApplicationStore<JsonFileBackend> {
    /// Open the store backed by the JSON file at `path`.
    ///
    /// A missing file is a first run and opens empty.
    #[must_use]
    pub fn open_file(path: impl AsRef<Path>) -> Self {
        Self::open(JsonFileBackend::new(path))
    }

    /// Path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.backend.path()
    }
}

impl ApplicationStore<MemoryBackend> {
    /// Create an empty store that keeps everything in memory.
    #[must_use]
    pub fn open_in_memory() -> Self {
        Self::open(MemoryBackend::new())
    }
}

impl<P: Persistence> ApplicationStore<P> {
    /// Load the collection from `backend`.
    ///
    /// If the stored data cannot be read or parsed the store starts empty and
    /// the failure is logged; it is never partially populated.
    pub fn open(backend: P) -> Self {
        let (applications, load_failed) = match backend.load() {
            Ok(applications) => (applications, false),
            Err(e) => {
                error!("Could not load data from {}: {e}", backend.location());
                (Vec::new(), true)
            }
        };

        info!(
            "Opened store at {} with {} applications",
            backend.location(),
            applications.len()
        );

        Self {
            backend,
            applications,
            load_failed,
            unreadable_pending: load_failed,
            last_save_failed: false,
        }
    }

    /// Append `application` and persist the collection.
    pub fn add(&mut self, application: CollegeApplication) {
        debug!("Adding application for {}", application.college_name);
        self.applications.push(application);
        self.persist();
    }

    /// Applications whose name contains `query`, ignoring case, in stored order.
    #[must_use]
    pub fn search_by_name(&self, query: &str) -> Vec<&CollegeApplication> {
        let results: Vec<_> = self
            .applications
            .iter()
            .filter(|app| app.name_contains(query))
            .collect();
        debug!("Search for {query:?} matched {} applications", results.len());
        results
    }

    /// Remove every application whose name equals `name`, ignoring case.
    ///
    /// Returns `true` if anything was removed. The backend is only written
    /// when something was.
    pub fn delete_by_name(&mut self, name: &str) -> bool {
        let before = self.applications.len();
        self.applications.retain(|app| !app.name_matches(name));
        let removed = before - self.applications.len();

        if removed == 0 {
            debug!("No application named {name:?} to delete");
            return false;
        }

        info!("Deleted {removed} applications named {name:?}");
        self.persist();
        true
    }

    /// Every application in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[CollegeApplication] {
        &self.applications
    }

    /// Number of stored applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.applications.len()
    }

    /// Whether the store holds no applications.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.applications.is_empty()
    }

    /// Whether the initial load failed and the store started empty.
    #[must_use]
    pub fn load_failed(&self) -> bool {
        self.load_failed
    }

    /// Whether the most recent save failed.
    #[must_use]
    pub fn last_save_failed(&self) -> bool {
        self.last_save_failed
    }

    /// The persistence backend.
    #[must_use]
    pub fn backend(&self) -> &P {
        &self.backend
    }

    /// Summary counts over the collection.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let apps = &self.applications;
        StoreStats {
            location: self.backend.location(),
            total_applications: apps.len(),
            total_recommenders: apps.iter().map(|a| a.recommenders.len()).sum(),
            essays_written: apps.iter().filter(|a| a.essay_written).count(),
            transcripts_submitted: apps.iter().filter(|a| a.transcripts_submitted).count(),
            total_cost: apps.iter().map(|a| a.cost).sum(),
        }
    }

    fn persist(&mut self) {
        if self.unreadable_pending {
            match self.backend.preserve_unreadable() {
                Ok(Some(copy)) => {
                    warn!("Unreadable data at {} kept as {copy}", self.backend.location());
                }
                Ok(None) => {}
                Err(e) => {
                    error!(
                        "Could not keep a copy of unreadable data at {}: {e}",
                        self.backend.location()
                    );
                    warn!("Not overwriting it; in-memory applications are unsaved");
                    self.last_save_failed = true;
                    return;
                }
            }
            self.unreadable_pending = false;
        }

        match self.backend.save(&self.applications) {
            Ok(()) => self.last_save_failed = false,
            Err(e) => {
                error!("Could not save data to {}: {e}", self.backend.location());
                warn!("In-memory applications are newer than the stored copy");
                self.last_save_failed = true;
            }
        }
    }
}

/// Summary counts over the stored applications.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreStats {
    /// Where the records live.
    pub location: String,
    /// Number of applications.
    pub total_applications: usize,
    /// Number of recommenders across all applications.
    pub total_recommenders: usize,
    /// Applications with the essay done.
    pub essays_written: usize,
    /// Applications with transcripts sent.
    pub transcripts_submitted: usize,
    /// Sum of all application costs.
    pub total_cost: f64,
}
