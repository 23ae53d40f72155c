pub mod settings;

use crate::core::confirm::normalize_extension;
use crate::core::DialogMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a picker session is started with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub mode: DialogMode,
    /// Absolute path of the first directory shown. `None` uses the working directory.
    pub initial_directory: Option<PathBuf>,
    /// `Label|pat1;pat2|Label2|pat3` filter grammar.
    pub filter: String,
    /// Stored without the leading dot.
    pub default_extension: String,
    pub initial_filename: String,
    /// Open/save only: a commit may yield several paths from the listing selection.
    pub multiselect: bool,
    /// Save only: the target must already exist.
    pub require_exists: bool,
    pub title: Option<String>,
    pub remember_last_directory: bool,
    pub last_directory: Option<PathBuf>,
}

impl SessionConfig {
    pub fn load() -> Result<Self> {
        settings::load_config(None)
    }

    pub fn set_default_extension(&mut self, ext: &str) {
        self.default_extension = normalize_extension(ext);
    }

    /// The directory a new session should open in.
    pub fn start_directory(&self) -> Option<PathBuf> {
        if self.remember_last_directory {
            if let Some(last) = &self.last_directory {
                return Some(last.clone());
            }
        }
        self.initial_directory.clone()
    }

    /// Multiselect only applies to file modes.
    pub fn allows_multiselect(&self) -> bool {
        self.multiselect && self.mode != DialogMode::SelectFolder
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: DialogMode::OpenFile,
            initial_directory: None,
            filter: String::new(),
            default_extension: String::new(),
            initial_filename: String::new(),
            multiselect: false,
            require_exists: false,
            title: None,
            remember_last_directory: false,
            last_directory: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_extension_drops_leading_dot() {
        let mut config = SessionConfig::default();
        config.set_default_extension(".txt");
        assert_eq!(config.default_extension, "txt");
        config.set_default_extension("md");
        assert_eq!(config.default_extension, "md");
    }

    #[test]
    fn test_start_directory_prefers_remembered_directory() {
        let mut config = SessionConfig {
            initial_directory: Some(PathBuf::from("/initial")),
            last_directory: Some(PathBuf::from("/last")),
            ..Default::default()
        };
        assert_eq!(config.start_directory(), Some(PathBuf::from("/initial")));
        config.remember_last_directory = true;
        assert_eq!(config.start_directory(), Some(PathBuf::from("/last")));
    }

    #[test]
    fn test_multiselect_is_ignored_for_folders() {
        let mut config = SessionConfig {
            multiselect: true,
            ..Default::default()
        };
        assert!(config.allows_multiselect());
        config.mode = DialogMode::SelectFolder;
        assert!(!config.allows_multiselect());
    }
}
