//! Responsible for transforming the `SessionState` into a `ViewModel`.
//!
//! This is the presentation projection of a session: everything a dialog needs
//! to draw itself, already rendered to display strings.

use crate::core::{DialogMode, EntryKind, FilterMode};
use crate::utils::file_detection::FileCategory;
use crate::utils::format::{format_modified, format_size};
use serde::Serialize;
use std::path::PathBuf;

use super::state::SessionState;

/// A serializable representation of the dialog for the UI.
#[derive(Serialize, Clone, Debug)]
pub struct ViewModel {
    pub title: String,
    pub ok_label: String,
    pub mode: DialogMode,
    pub current_directory: Option<PathBuf>,
    pub rows: Vec<EntryRow>,
    pub filter_labels: Vec<String>,
    /// `None` while a custom wildcard filter is in effect.
    pub active_filter: Option<usize>,
    pub custom_filter: Option<String>,
    pub typed_name: String,
    pub filename_editable: bool,
    pub multiselect: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    pub is_busy: bool,
    pub overwrite_pending: bool,
    pub error: Option<String>,
}

/// A serializable representation of one listing row.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryRow {
    pub name: String,
    pub kind: EntryKind,
    pub category: FileCategory,
    /// Empty for directories.
    pub size: String,
    /// Empty for directories or when unavailable.
    pub modified: String,
    pub selected: bool,
}

pub fn default_title(mode: DialogMode) -> &'static str {
    match mode {
        DialogMode::OpenFile => "Open",
        DialogMode::SaveFile => "Save as",
        DialogMode::SelectFolder => "Select folder",
    }
}

pub fn ok_label(mode: DialogMode) -> &'static str {
    match mode {
        DialogMode::OpenFile => "Open",
        DialogMode::SaveFile => "Save",
        DialogMode::SelectFolder => "Select",
    }
}

/// Creates the complete `ViewModel` from the current `SessionState`.
pub fn generate_view_model(state: &SessionState) -> ViewModel {
    let mode = state.config.mode;
    let rows = state
        .entries
        .iter()
        .enumerate()
        .map(|(i, entry)| EntryRow {
            name: entry.name.clone(),
            kind: entry.kind,
            category: entry.category,
            size: entry.size_bytes.map(format_size).unwrap_or_default(),
            modified: entry.last_modified.map(format_modified).unwrap_or_default(),
            selected: state.selection.contains(&i),
        })
        .collect();

    let (active_filter, custom_filter) = match &state.filter_mode {
        FilterMode::Active(i) if *i < state.filters.entries.len() => (Some(*i), None),
        FilterMode::Active(_) => (None, None),
        FilterMode::Custom(text) => (None, Some(text.clone())),
    };

    ViewModel {
        title: state
            .config
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| default_title(mode).to_string()),
        ok_label: ok_label(mode).to_string(),
        mode,
        current_directory: state.current_dir().map(|p| p.to_path_buf()),
        rows,
        filter_labels: state.filters.labels(),
        active_filter,
        custom_filter,
        typed_name: state.typed_name.clone(),
        filename_editable: mode != DialogMode::SelectFolder,
        multiselect: state.config.allows_multiselect(),
        can_undo: state.history.can_undo(),
        can_redo: state.history.can_redo(),
        is_busy: state.is_busy,
        overwrite_pending: state.pending_overwrite.is_some(),
        error: state.last_error.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SessionConfig;
    use crate::core::DirectoryEntry;

    fn entry(name: &str, kind: EntryKind, size: Option<u64>) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            kind,
            size_bytes: size,
            last_modified: None,
            category: if kind == EntryKind::Directory {
                FileCategory::Folder
            } else {
                FileCategory::File
            },
        }
    }

    #[test]
    fn test_titles_and_labels_follow_mode() {
        let mut state = SessionState::new(SessionConfig {
            mode: DialogMode::SaveFile,
            ..Default::default()
        });
        let view = generate_view_model(&state);
        assert_eq!(view.title, "Save as");
        assert_eq!(view.ok_label, "Save");
        assert!(view.filename_editable);

        state.config.mode = DialogMode::SelectFolder;
        state.config.title = Some("Pick output".to_string());
        let view = generate_view_model(&state);
        assert_eq!(view.title, "Pick output");
        assert_eq!(view.ok_label, "Select");
        assert!(!view.filename_editable);
    }

    #[test]
    fn test_rows_render_sizes_and_selection() {
        let mut state = SessionState::new(SessionConfig::default());
        state.entries = vec![
            entry("src", EntryKind::Directory, None),
            entry("big.bin", EntryKind::File, Some(3 * 1024 * 1024 * 1024)),
        ];
        state.selection = vec![1];

        let view = generate_view_model(&state);
        assert_eq!(view.rows[0].size, "");
        assert!(!view.rows[0].selected);
        assert_eq!(view.rows[1].size, "3072 MB");
        assert!(view.rows[1].selected);
    }

    #[test]
    fn test_filter_fields_reflect_mode() {
        let mut state = SessionState::new(SessionConfig {
            filter: "Text|*.txt|All|*".to_string(),
            ..Default::default()
        });
        state.filter_mode = FilterMode::Active(1);
        let view = generate_view_model(&state);
        assert_eq!(view.filter_labels, vec!["Text", "All"]);
        assert_eq!(view.active_filter, Some(1));
        assert_eq!(view.custom_filter, None);

        state.filter_mode = FilterMode::Custom("*.md".to_string());
        let view = generate_view_model(&state);
        assert_eq!(view.active_filter, None);
        assert_eq!(view.custom_filter.as_deref(), Some("*.md"));
    }
}
