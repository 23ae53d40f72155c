use super::error::CoreError;
use super::filter::{build_name_matcher, FilterMode, FilterSpec};
use super::fs::FileSystem;
use super::{DirectoryEntry, EntryKind};
use crate::utils::file_detection::{FileCategory, FileTypeClassifier};
use std::path::Path;

/// Turns a directory plus the current filter into display-ready entries.
///
/// Every call enumerates from scratch; nothing is cached between listings.
pub struct DirectoryLister<'a> {
    fs: &'a dyn FileSystem,
    classifier: &'static FileTypeClassifier,
}

impl<'a> DirectoryLister<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self {
            fs,
            classifier: FileTypeClassifier::global(),
        }
    }

    /// Lists `directory`. Subdirectories are always included; the filter only
    /// restricts files. All directories come before all files, and each group
    /// is ordered by case-insensitive name.
    pub fn list(
        &self,
        directory: &Path,
        spec: &FilterSpec,
        mode: &FilterMode,
    ) -> Result<Vec<DirectoryEntry>, CoreError> {
        let raw = self
            .fs
            .read_dir(directory)
            .map_err(|source| CoreError::ListingFailed {
                path: directory.to_path_buf(),
                source,
            })?;

        let matcher = build_name_matcher(&mode.patterns(spec));
        let mut dirs = Vec::new();
        let mut files = Vec::new();

        for entry in raw {
            if entry.is_dir {
                dirs.push(DirectoryEntry {
                    name: entry.name,
                    kind: EntryKind::Directory,
                    size_bytes: None,
                    last_modified: None,
                    category: FileCategory::Folder,
                });
            } else if matcher.is_match(&entry.name) {
                files.push(DirectoryEntry {
                    category: self.classifier.classify_path(Path::new(&entry.name)),
                    name: entry.name,
                    kind: EntryKind::File,
                    size_bytes: entry.size,
                    last_modified: entry.modified,
                });
            }
        }

        dirs.sort_by_cached_key(|e| e.name.to_lowercase());
        files.sort_by_cached_key(|e| e.name.to_lowercase());
        tracing::debug!(
            "Listed {}: {} directories, {} files",
            directory.display(),
            dirs.len(),
            files.len()
        );

        dirs.extend(files);
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::{FsEntry, FsMetadata, StdFileSystem};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn setup_dir() -> TempDir {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("B")).unwrap();
        fs::create_dir(temp.path().join("A")).unwrap();
        fs::write(temp.path().join("b.txt"), "hello").unwrap();
        fs::write(temp.path().join("a.png"), vec![0u8; 2048]).unwrap();
        fs::write(temp.path().join("notes.md"), "# notes").unwrap();
        temp
    }

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_directories_precede_files() {
        let temp = setup_dir();
        let lister = DirectoryLister::new(&StdFileSystem);
        let entries = lister
            .list(temp.path(), &FilterSpec::default(), &FilterMode::default())
            .unwrap();

        assert_eq!(entries.len(), 5);
        let first_file = entries.iter().position(|e| !e.is_directory()).unwrap();
        assert!(entries[..first_file].iter().all(|e| e.is_directory()));
        assert!(entries[first_file..].iter().all(|e| !e.is_directory()));
        assert_eq!(names(&entries), vec!["A", "B", "a.png", "b.txt", "notes.md"]);
    }

    #[test]
    fn test_filter_applies_to_files_only() {
        let temp = setup_dir();
        let spec = FilterSpec::parse("Text|*.txt;*.TXT;*.md|Images|*.png");
        let lister = DirectoryLister::new(&StdFileSystem);

        let entries = lister.list(temp.path(), &spec, &FilterMode::Active(0)).unwrap();
        assert_eq!(names(&entries), vec!["A", "B", "b.txt", "notes.md"]);

        let entries = lister.list(temp.path(), &spec, &FilterMode::Active(1)).unwrap();
        assert_eq!(names(&entries), vec!["A", "B", "a.png"]);
    }

    #[test]
    fn test_custom_filter_matches_by_prefix() {
        let temp = setup_dir();
        let spec = FilterSpec::parse("Images|*.png");
        let lister = DirectoryLister::new(&StdFileSystem);

        let entries = lister
            .list(temp.path(), &spec, &FilterMode::Custom("no".to_string()))
            .unwrap();
        assert_eq!(names(&entries), vec!["A", "B", "notes.md"]);
    }

    #[test]
    fn test_file_entries_carry_size_time_and_category() {
        let temp = setup_dir();
        let lister = DirectoryLister::new(&StdFileSystem);
        let entries = lister
            .list(temp.path(), &FilterSpec::default(), &FilterMode::default())
            .unwrap();

        let png = entries.iter().find(|e| e.name == "a.png").unwrap();
        assert_eq!(png.size_bytes, Some(2048));
        assert!(png.last_modified.is_some());
        assert_eq!(png.category, FileCategory::Image);

        let dir = entries.iter().find(|e| e.name == "A").unwrap();
        assert_eq!(dir.category, FileCategory::Folder);
        assert_eq!(dir.size_bytes, None);
        assert_eq!(dir.last_modified, None);
    }

    #[test]
    fn test_missing_directory_fails_with_listing_failed() {
        let temp = tempfile::tempdir().unwrap();
        let gone = temp.path().join("gone");
        let lister = DirectoryLister::new(&StdFileSystem);
        let err = lister
            .list(&gone, &FilterSpec::default(), &FilterMode::default())
            .unwrap_err();
        assert!(matches!(err, CoreError::ListingFailed { path, .. } if path == gone));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory_fails_with_listing_failed() {
        use crate::utils::test_helpers::{running_as_root, setup_test_logging, LockedDir};

        setup_test_logging();
        if running_as_root() {
            return;
        }

        let temp = setup_dir();
        let locked = temp.path().join("A");
        let _guard = LockedDir::new(&locked).unwrap();
        let result = DirectoryLister::new(&StdFileSystem).list(
            &locked,
            &FilterSpec::default(),
            &FilterMode::default(),
        );

        assert!(matches!(result, Err(CoreError::ListingFailed { .. })));
    }

    /// Returns the same file under two names that only differ in case.
    struct DuplicateFs;

    impl FileSystem for DuplicateFs {
        fn metadata(&self, _path: &Path) -> std::io::Result<FsMetadata> {
            Ok(FsMetadata {
                is_dir: true,
                is_file: false,
            })
        }

        fn probe_dir(&self, _dir: &Path) -> std::io::Result<()> {
            Ok(())
        }

        fn read_dir(&self, _dir: &Path) -> std::io::Result<Vec<FsEntry>> {
            Ok(vec![FsEntry {
                name: "Data.CSV".to_string(),
                is_dir: false,
                size: Some(10),
                modified: None,
            }])
        }
    }

    #[test]
    fn test_overlapping_patterns_do_not_duplicate_entries() {
        let spec = FilterSpec::parse("Data|*.csv;*.CSV;Data.*;*");
        let lister = DirectoryLister::new(&DuplicateFs);
        let entries = lister
            .list(&PathBuf::from("/virtual"), &spec, &FilterMode::Active(0))
            .unwrap();
        assert_eq!(names(&entries), vec!["Data.CSV"]);
        assert_eq!(entries[0].category, FileCategory::Data);
    }
}
