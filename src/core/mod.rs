pub mod confirm;
pub mod error;
pub mod filter;
pub mod fs;
pub mod history;
pub mod lister;
pub mod validator;

use crate::utils::file_detection::FileCategory;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// What the dialog is for. Fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogMode {
    #[default]
    OpenFile,
    SaveFile,
    SelectFolder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Directory,
    File,
}

/// One row of a directory listing.
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    pub name: String,
    pub kind: EntryKind,
    /// Files only.
    pub size_bytes: Option<u64>,
    /// Files only.
    pub last_modified: Option<SystemTime>,
    pub category: FileCategory,
}

impl DirectoryEntry {
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

pub use confirm::{ConfirmationPolicy, Decision};
pub use error::CoreError;
pub use filter::{FilterEntry, FilterMode, FilterSpec};
pub use fs::{FileSystem, StdFileSystem};
pub use history::NavigationHistory;
pub use lister::DirectoryLister;
