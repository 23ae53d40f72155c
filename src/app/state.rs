//! Defines the mutable state of one picker session.

use super::custom_pane::CustomPane;
use crate::config::SessionConfig;
use crate::core::{
    DirectoryEntry, FileSystem, FilterMode, FilterSpec, NavigationHistory, StdFileSystem,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// The final choice of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerResult {
    /// One path, or several in listing order under multiselect.
    pub paths: Vec<PathBuf>,
    /// The filename text as the user typed it.
    pub typed_name: String,
}

/// Holds the complete state of a picker session.
///
/// Owned by exactly one session and never shared between threads; every
/// mutation goes through a command in [`super::commands`].
pub struct SessionState {
    /// The configuration the session was started with.
    pub config: SessionConfig,
    /// File-system access for probes, listings and commit checks.
    pub fs: Box<dyn FileSystem>,
    /// The current directory and its back/forward buffer.
    pub history: NavigationHistory,
    /// Filters parsed from the configured filter string.
    pub filters: FilterSpec,
    /// Whether a filter entry or a typed wildcard string is restricting files.
    pub filter_mode: FilterMode,
    /// The filter entry restored when a custom filter is cleared.
    pub last_active_filter: usize,
    /// The text of the filename field.
    pub typed_name: String,
    /// The current listing. Recomputed in full on every refresh.
    pub entries: Vec<DirectoryEntry>,
    /// Indexes into `entries`, in click order.
    pub selection: Vec<usize>,
    /// Targets waiting for an overwrite answer.
    pub pending_overwrite: Option<Vec<PathBuf>>,
    /// Message of the last rejected action, cleared by the next successful one.
    pub last_error: Option<String>,
    /// `true` while a listing is being enumerated.
    pub is_busy: bool,
    /// `true` once the session was accepted or cancelled.
    pub is_closed: bool,
    /// Set on accept; stays `None` on cancel.
    pub result: Option<PickerResult>,
    /// UI-owned extension area. Never read by the session.
    pub custom_pane: Option<Box<dyn CustomPane>>,
}

impl SessionState {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_file_system(config, Box::new(StdFileSystem))
    }

    pub fn with_file_system(config: SessionConfig, fs: Box<dyn FileSystem>) -> Self {
        let filters = FilterSpec::parse(&config.filter);
        Self {
            config,
            fs,
            history: NavigationHistory::new(),
            filters,
            filter_mode: FilterMode::default(),
            last_active_filter: 0,
            typed_name: String::new(),
            entries: Vec::new(),
            selection: Vec::new(),
            pending_overwrite: None,
            last_error: None,
            is_busy: false,
            is_closed: false,
            result: None,
            custom_pane: None,
        }
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.history.current()
    }

    /// Selected file names in listing order.
    pub fn selected_file_names(&self) -> Vec<String> {
        let mut indexes: Vec<usize> = self
            .selection
            .iter()
            .copied()
            .filter(|&i| self.entries.get(i).is_some_and(|e| !e.is_directory()))
            .collect();
        indexes.sort_unstable();
        indexes
            .into_iter()
            .map(|i| self.entries[i].name.clone())
            .collect()
    }

    /// Drops the listing-bound parts of the state before a re-listing.
    pub fn reset_listing_state(&mut self) {
        self.entries.clear();
        self.selection.clear();
        self.pending_overwrite = None;
    }
}
