//! Mode-dependent acceptance of the user's final choice.
//!
//! Checks here run only on commit, never while the user is typing.

use super::error::CoreError;
use super::fs::FileSystem;
use super::validator;
use super::DialogMode;
use std::path::{Path, PathBuf};

/// Outcome of a commit that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The choice is final.
    Accept(Vec<PathBuf>),
    /// At least one target already exists; the caller must ask before accepting.
    /// Declining is a user choice, not an error.
    ConfirmOverwrite(Vec<PathBuf>),
}

/// Strips a single leading dot: `".txt"` and `"txt"` both become `"txt"`.
pub fn normalize_extension(ext: &str) -> String {
    ext.strip_prefix('.').unwrap_or(ext).to_string()
}

fn last_segment(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

/// `true` when the last segment names no file (`""`, `.` or `..`).
fn is_dot_segment(name: &str) -> bool {
    matches!(last_segment(name), "" | "." | "..")
}

pub struct ConfirmationPolicy<'a> {
    fs: &'a dyn FileSystem,
    mode: DialogMode,
    default_extension: Option<String>,
    require_exists: bool,
}

impl<'a> ConfirmationPolicy<'a> {
    pub fn new(fs: &'a dyn FileSystem, mode: DialogMode) -> Self {
        Self {
            fs,
            mode,
            default_extension: None,
            require_exists: false,
        }
    }

    /// Extension appended to names that have none. Empty means no default.
    pub fn with_default_extension(mut self, ext: &str) -> Self {
        let ext = normalize_extension(ext.trim());
        self.default_extension = (!ext.is_empty()).then_some(ext);
        self
    }

    /// In save mode, also require the target to exist already.
    pub fn with_require_exists(mut self, yes: bool) -> Self {
        self.require_exists = yes;
        self
    }

    /// Joins `name` onto `current_dir` and appends the default extension if
    /// the name has none.
    ///
    /// A trailing `.` marks the name as final: the dot is dropped and no
    /// extension is appended (`notes.` saves as `notes`). A leading-dot name
    /// such as `.env` counts as already complete.
    pub fn resolve(&self, current_dir: &Path, name: &str) -> PathBuf {
        if let Some(bare) = name.strip_suffix('.').filter(|bare| !is_dot_segment(bare)) {
            return current_dir.join(bare);
        }

        let path = current_dir.join(name);
        let has_extension = path.extension().is_some() || last_segment(name).starts_with('.');
        match &self.default_extension {
            Some(ext) if !has_extension && !is_dot_segment(name) => {
                let mut raw = path.into_os_string();
                raw.push(".");
                raw.push(ext);
                PathBuf::from(raw)
            }
            _ => path,
        }
    }

    /// Evaluates a single typed name.
    pub fn evaluate(&self, current_dir: &Path, typed_name: &str) -> Result<Decision, CoreError> {
        self.evaluate_many(current_dir, &[typed_name])
    }

    /// Evaluates one or more names (multiselect). Any failing name blocks the
    /// whole commit; any existing save target turns it into an overwrite prompt.
    pub fn evaluate_many<S: AsRef<str>>(
        &self,
        current_dir: &Path,
        names: &[S],
    ) -> Result<Decision, CoreError> {
        if self.mode == DialogMode::SelectFolder {
            return Ok(Decision::Accept(vec![current_dir.to_path_buf()]));
        }
        if names.is_empty() {
            return Err(CoreError::InvalidName("no name given".to_string()));
        }

        let mut paths = Vec::with_capacity(names.len());
        let mut needs_overwrite = false;
        for name in names {
            let name = name.as_ref();
            if name.trim().is_empty() {
                return Err(CoreError::InvalidName("name is empty".to_string()));
            }
            if !validator::is_valid(name, false) {
                return Err(CoreError::InvalidName(name.to_string()));
            }

            let path = self.resolve(current_dir, name);
            match self.mode {
                DialogMode::OpenFile => {
                    if !self.fs.is_file(&path) {
                        return Err(CoreError::FileNotFound(path));
                    }
                }
                DialogMode::SaveFile => match self.fs.metadata(&path) {
                    Ok(md) if md.is_dir => {
                        return Err(CoreError::InvalidName(format!(
                            "{name} is a directory"
                        )));
                    }
                    Ok(_) => needs_overwrite = true,
                    Err(_) if self.require_exists => return Err(CoreError::FileNotFound(path)),
                    Err(_) => {}
                },
                DialogMode::SelectFolder => {}
            }
            paths.push(path);
        }

        if needs_overwrite {
            Ok(Decision::ConfirmOverwrite(paths))
        } else {
            Ok(Decision::Accept(paths))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fs::StdFileSystem;
    use std::fs;

    fn dir_with(files: &[&str]) -> tempfile::TempDir {
        let temp = tempfile::tempdir().unwrap();
        for f in files {
            fs::write(temp.path().join(f), "content").unwrap();
        }
        temp
    }

    #[test]
    fn test_select_folder_ignores_typed_text() {
        let temp = dir_with(&[]);
        let policy = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SelectFolder)
            .with_default_extension("txt");
        for typed in ["", "CON", "whatever*"] {
            assert_eq!(
                policy.evaluate(temp.path(), typed).unwrap(),
                Decision::Accept(vec![temp.path().to_path_buf()])
            );
        }
    }

    #[test]
    fn test_open_requires_existing_file() {
        let temp = dir_with(&["present.txt"]);
        fs::create_dir(temp.path().join("folder")).unwrap();
        let policy = ConfirmationPolicy::new(&StdFileSystem, DialogMode::OpenFile);

        assert_eq!(
            policy.evaluate(temp.path(), "present.txt").unwrap(),
            Decision::Accept(vec![temp.path().join("present.txt")])
        );
        assert!(matches!(
            policy.evaluate(temp.path(), "missing.txt"),
            Err(CoreError::FileNotFound(p)) if p == temp.path().join("missing.txt")
        ));
        assert!(matches!(
            policy.evaluate(temp.path(), "folder"),
            Err(CoreError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_default_extension_skips_dotfiles_and_trailing_dots() {
        let temp = dir_with(&[]);
        let dir = temp.path();
        let policy = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile)
            .with_default_extension(".txt");

        assert_eq!(policy.resolve(dir, "notes"), dir.join("notes.txt"));
        assert_eq!(policy.resolve(dir, "notes.md"), dir.join("notes.md"));
        assert_eq!(policy.resolve(dir, ".env"), dir.join(".env"));
        assert_eq!(policy.resolve(dir, "sub/.env"), dir.join("sub/.env"));
        assert_eq!(policy.resolve(dir, "notes."), dir.join("notes"));
        assert_eq!(policy.resolve(dir, ".."), dir.join(".."));
        assert_eq!(policy.resolve(dir, "..."), dir.join("..."));

        assert_eq!(
            policy.evaluate(dir, "Makefile.").unwrap(),
            Decision::Accept(vec![dir.join("Makefile")])
        );
        let plain = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile);
        assert_eq!(plain.resolve(dir, "notes."), dir.join("notes"));
    }

    #[test]
    fn test_empty_and_invalid_names_are_rejected() {
        let temp = dir_with(&[]);
        for mode in [DialogMode::OpenFile, DialogMode::SaveFile] {
            let policy = ConfirmationPolicy::new(&StdFileSystem, mode);
            for typed in ["", "   ", "CON.txt", "*.txt", "a|b"] {
                assert!(
                    matches!(
                        policy.evaluate(temp.path(), typed),
                        Err(CoreError::InvalidName(_))
                    ),
                    "{typed:?} should be rejected in {mode:?}"
                );
            }
        }
    }

    #[test]
    fn test_save_existing_file_needs_overwrite_confirmation() {
        let temp = dir_with(&["report.txt"]);
        let policy = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile);
        assert_eq!(
            policy.evaluate(temp.path(), "report.txt").unwrap(),
            Decision::ConfirmOverwrite(vec![temp.path().join("report.txt")])
        );
        assert_eq!(
            policy.evaluate(temp.path(), "fresh.txt").unwrap(),
            Decision::Accept(vec![temp.path().join("fresh.txt")])
        );
    }

    #[test]
    fn test_save_onto_directory_is_invalid() {
        let temp = dir_with(&[]);
        fs::create_dir(temp.path().join("out")).unwrap();
        let policy = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile);
        assert!(matches!(
            policy.evaluate(temp.path(), "out"),
            Err(CoreError::InvalidName(_))
        ));
    }

    #[test]
    fn test_save_with_require_exists() {
        let temp = dir_with(&["old.log"]);
        let policy =
            ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile).with_require_exists(true);
        assert!(matches!(
            policy.evaluate(temp.path(), "new.log"),
            Err(CoreError::FileNotFound(_))
        ));
        assert!(matches!(
            policy.evaluate(temp.path(), "old.log"),
            Ok(Decision::ConfirmOverwrite(_))
        ));
    }

    #[test]
    fn test_default_extension_is_appended_before_checks() {
        let temp = dir_with(&["notes.txt"]);
        let save = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile)
            .with_default_extension(".txt");
        assert_eq!(
            save.evaluate(temp.path(), "draft").unwrap(),
            Decision::Accept(vec![temp.path().join("draft.txt")])
        );
        assert_eq!(
            save.evaluate(temp.path(), "draft.md").unwrap(),
            Decision::Accept(vec![temp.path().join("draft.md")])
        );

        let open = ConfirmationPolicy::new(&StdFileSystem, DialogMode::OpenFile)
            .with_default_extension("txt");
        assert_eq!(
            open.evaluate(temp.path(), "notes").unwrap(),
            Decision::Accept(vec![temp.path().join("notes.txt")])
        );
    }

    #[test]
    fn test_multiple_names_share_one_decision() {
        let temp = dir_with(&["a.txt", "b.txt"]);
        let open = ConfirmationPolicy::new(&StdFileSystem, DialogMode::OpenFile);
        assert_eq!(
            open.evaluate_many(temp.path(), &["a.txt", "b.txt"]).unwrap(),
            Decision::Accept(vec![temp.path().join("a.txt"), temp.path().join("b.txt")])
        );
        assert!(matches!(
            open.evaluate_many(temp.path(), &["a.txt", "c.txt"]),
            Err(CoreError::FileNotFound(_))
        ));

        let save = ConfirmationPolicy::new(&StdFileSystem, DialogMode::SaveFile);
        assert!(matches!(
            save.evaluate_many(temp.path(), &["new.txt", "b.txt"]),
            Ok(Decision::ConfirmOverwrite(paths)) if paths.len() == 2
        ));
    }

    #[test]
    fn test_normalize_extension() {
        assert_eq!(normalize_extension(".txt"), "txt");
        assert_eq!(normalize_extension("txt"), "txt");
        assert_eq!(normalize_extension(""), "");
    }
}
