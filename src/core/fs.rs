//! The file-system seam used by the core.
//!
//! Navigation probes, listings and commit checks all go through [`FileSystem`],
//! so tests can swap in a fake that simulates unreadable or vanishing directories.

use std::path::Path;
use std::time::SystemTime;

/// Minimal metadata the core needs about a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FsMetadata {
    pub is_dir: bool,
    pub is_file: bool,
}

/// A raw directory entry before classification.
#[derive(Clone, Debug)]
pub struct FsEntry {
    /// Base name (no parent path).
    pub name: String,
    pub is_dir: bool,
    /// File size in bytes; `None` for directories or when unavailable.
    pub size: Option<u64>,
    pub modified: Option<SystemTime>,
}

pub trait FileSystem {
    /// Fetch metadata for a path, following symlinks.
    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata>;

    /// Trial enumeration: succeeds only if `dir` can be opened for listing.
    fn probe_dir(&self, dir: &Path) -> std::io::Result<()>;

    /// List all entries of a directory.
    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>>;

    fn is_dir(&self, path: &Path) -> bool {
        self.metadata(path).map(|md| md.is_dir).unwrap_or(false)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.metadata(path).map(|md| md.is_file).unwrap_or(false)
    }
}

/// Default implementation backed by `std::fs`.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn metadata(&self, path: &Path) -> std::io::Result<FsMetadata> {
        let md = std::fs::metadata(path)?;
        Ok(FsMetadata {
            is_dir: md.is_dir(),
            is_file: md.is_file(),
        })
    }

    fn probe_dir(&self, dir: &Path) -> std::io::Result<()> {
        std::fs::read_dir(dir).map(|_| ())
    }

    fn read_dir(&self, dir: &Path) -> std::io::Result<Vec<FsEntry>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            // Entries that disappear mid-iteration are skipped.
            let Ok(entry) = entry else { continue };
            // Follow symlinks so a link to a directory lists as a directory.
            let Ok(md) = std::fs::metadata(entry.path()) else {
                continue;
            };
            let is_dir = md.is_dir();
            out.push(FsEntry {
                name: entry.file_name().to_string_lossy().to_string(),
                is_dir,
                size: if is_dir { None } else { Some(md.len()) },
                modified: if is_dir { None } else { md.modified().ok() },
            });
        }
        Ok(out)
    }
}
