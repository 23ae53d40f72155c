//! Defines the events sent to the presentation layer and the commands it sends back.

use serde::Deserialize;
use std::path::PathBuf;

use super::state::PickerResult;
use super::view_model::ViewModel;

/// Events sent from the session to the presentation layer.
#[derive(Debug)]
pub enum SessionEvent {
    /// A complete state update to re-render the dialog.
    StateUpdate(Box<ViewModel>),
    /// Enumeration started (`true`) or finished (`false`).
    Busy(bool),
    /// A message to show the user; the dialog stays open.
    Error(String),
    /// The save target exists; ask before overwriting.
    OverwritePrompt(Vec<PathBuf>),
    /// The session ended. `None` means cancelled.
    Closed(Option<PickerResult>),
}

/// A state-changing request from the presentation layer.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "command", content = "payload", rename_all = "snake_case")]
pub enum Command {
    /// Address-bar navigation. Relative paths resolve against the current directory.
    NavigateTo(PathBuf),
    GoUp,
    Undo,
    Redo,
    Refresh,
    SelectFilter(usize),
    ClearCustomFilter,
    SetTypedName(String),
    /// Single click on a listing row.
    SelectEntry { index: usize, additive: bool },
    /// Double click on a listing row.
    ActivateEntry(usize),
    /// Enter in the filename field.
    SubmitText,
    Commit,
    AcceptOverwrite,
    DeclineOverwrite,
    Cancel,
}
