//! Linear back/forward navigation over visited directories.

use super::error::CoreError;
use super::fs::FileSystem;
use std::path::{Path, PathBuf};

/// Owns the current directory and the undo/redo buffer.
///
/// `entries[cursor]` is always the current directory. Pushing after an undo
/// discards every redo-able entry before appending, so history never branches.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Vec<PathBuf>,
    cursor: usize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current directory, or `None` before the first push.
    pub fn current(&self) -> Option<&Path> {
        self.entries.get(self.cursor).map(PathBuf::as_path)
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Makes `path` the current directory.
    ///
    /// The directory is probed with a trial enumeration before anything is
    /// committed; on failure the history is left exactly as it was. Pushing the
    /// current directory again is a successful no-op.
    pub fn push(&mut self, fs: &dyn FileSystem, path: &Path) -> Result<&Path, CoreError> {
        if self.current() == Some(path) {
            return Ok(self.entries[self.cursor].as_path());
        }

        match fs.metadata(path) {
            Ok(md) if md.is_dir => {}
            Ok(_) => return Err(CoreError::unavailable(path, None)),
            Err(e) => return Err(CoreError::unavailable(path, Some(e))),
        }
        fs.probe_dir(path)
            .map_err(|e| CoreError::unavailable(path, Some(e)))?;

        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(path.to_path_buf());
        self.cursor = self.entries.len() - 1;
        tracing::info!("Navigated to {}", path.display());

        Ok(self.entries[self.cursor].as_path())
    }

    /// Steps back one entry and returns the now-current directory.
    pub fn undo(&mut self) -> Result<&Path, CoreError> {
        if !self.can_undo() {
            return Err(CoreError::NoHistory);
        }
        self.cursor -= 1;
        Ok(self.entries[self.cursor].as_path())
    }

    /// Steps forward one entry and returns the now-current directory.
    pub fn redo(&mut self) -> Result<&Path, CoreError> {
        if !self.can_redo() {
            return Err(CoreError::NoHistory);
        }
        self.cursor += 1;
        Ok(self.entries[self.cursor].as_path())
    }

    pub fn can_undo(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }
}
