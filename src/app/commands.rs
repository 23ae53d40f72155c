//! Contains all the command handlers a presentation layer can invoke.
//!
//! Each function corresponds to a [`Command`] variant. Handlers mutate the
//! `SessionState` through the core components and report back through the
//! `EventProxy`. Every successful directory change is followed by a full
//! re-listing.

use super::events::{Command, SessionEvent};
use super::helpers::{notify, report_error, with_state_and_notify};
use super::proxy::EventProxy;
use super::state::{PickerResult, SessionState};
use crate::core::{
    validator, ConfirmationPolicy, CoreError, Decision, DialogMode, DirectoryLister, FilterMode,
};
use std::path::{Component, Path, PathBuf};

/// Dispatches a single command. Commands arriving after the session closed are ignored.
pub fn handle_command<P: EventProxy + ?Sized>(
    state: &mut SessionState,
    proxy: &P,
    command: Command,
) {
    if state.is_closed {
        tracing::debug!("Ignoring {:?}: session already closed", command);
        return;
    }

    match command {
        Command::NavigateTo(path) => navigate_to(state, proxy, &path),
        Command::GoUp => go_up(state, proxy),
        Command::Undo => undo(state, proxy),
        Command::Redo => redo(state, proxy),
        Command::Refresh => refresh(state, proxy),
        Command::SelectFilter(index) => select_filter(state, proxy, index),
        Command::ClearCustomFilter => clear_custom_filter(state, proxy),
        Command::SetTypedName(text) => set_typed_name(state, proxy, text),
        Command::SelectEntry { index, additive } => select_entry(state, proxy, index, additive),
        Command::ActivateEntry(index) => activate_entry(state, proxy, index),
        Command::SubmitText => submit_text(state, proxy),
        Command::Commit => commit(state, proxy),
        Command::AcceptOverwrite => accept_overwrite(state, proxy),
        Command::DeclineOverwrite => decline_overwrite(state, proxy),
        Command::Cancel => cancel(state, proxy),
    }
}

/// Seeds the history with the configured start directory and lists it.
///
/// Falls back to the process working directory when none is configured. An
/// unavailable start directory is returned to the caller; the session cannot
/// show anything without one.
pub fn start<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) -> Result<(), CoreError> {
    let dir = match state.config.start_directory() {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| CoreError::unavailable(".", Some(e)))?,
    };
    let dir = if dir.is_absolute() {
        normalize_path(&dir)
    } else {
        std::path::absolute(&dir)
            .map(|abs| normalize_path(&abs))
            .map_err(|e| CoreError::unavailable(&dir, Some(e)))?
    };

    state.history.push(state.fs.as_ref(), &dir).map(|_| ())?;
    if state.config.mode != DialogMode::SelectFolder {
        state.typed_name = state.config.initial_filename.clone();
    }
    tracing::info!(
        "Started {:?} session in {}",
        state.config.mode,
        dir.display()
    );

    refresh_listing(state, proxy);
    notify(state, proxy);
    Ok(())
}

/// Address-bar navigation. Relative paths resolve against the current directory.
pub fn navigate_to<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, path: &Path) {
    let target = match state.current_dir() {
        Some(current) => current.join(path),
        None => path.to_path_buf(),
    };
    change_directory(state, proxy, &target);
}

/// Navigates to the parent directory. Does nothing at a root.
pub fn go_up<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    let Some(parent) = state
        .current_dir()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
    else {
        tracing::debug!("Already at a root directory");
        return;
    };
    change_directory(state, proxy, &parent);
}

pub fn undo<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    let moved = state.history.undo().map(|_| ());
    after_history_step(state, proxy, moved, "Undo");
}

pub fn redo<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    let moved = state.history.redo().map(|_| ());
    after_history_step(state, proxy, moved, "Redo");
}

/// Re-lists the current directory.
pub fn refresh<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    with_state_and_notify(state, proxy, |s| refresh_listing(s, proxy));
}

/// Activates a filter entry, discarding any custom wildcard filter.
pub fn select_filter<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, index: usize) {
    if index >= state.filters.entries.len() {
        tracing::debug!("Ignoring out-of-range filter index {}", index);
        return;
    }
    with_state_and_notify(state, proxy, |s| {
        s.filter_mode = FilterMode::Active(index);
        s.last_active_filter = index;
        refresh_listing(s, proxy);
    });
}

/// Returns from a custom wildcard filter to the last active filter entry.
pub fn clear_custom_filter<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    if state.filter_mode.custom().is_none() {
        return;
    }
    with_state_and_notify(state, proxy, |s| {
        s.filter_mode = FilterMode::Active(s.last_active_filter);
        refresh_listing(s, proxy);
    });
}

/// Updates the filename field. Text containing wildcards becomes the live
/// custom filter instead of a candidate name; nothing else is validated here.
/// Changing the name withdraws a pending overwrite prompt.
pub fn set_typed_name<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, text: String) {
    if state.config.mode == DialogMode::SelectFolder {
        tracing::debug!("Filename field is read-only when selecting a folder");
        return;
    }
    with_state_and_notify(state, proxy, |s| {
        let live_filter = validator::has_wildcards(&text) && validator::is_valid(&text, true);
        if s.typed_name != text {
            s.pending_overwrite = None;
        }
        s.typed_name = text;
        if live_filter {
            apply_custom_filter(s, proxy);
        }
    });
}

/// A single click on a listing row. Files copy their name into the filename field.
pub fn select_entry<P: EventProxy + ?Sized>(
    state: &mut SessionState,
    proxy: &P,
    index: usize,
    additive: bool,
) {
    let Some(entry) = state.entries.get(index) else {
        tracing::debug!("Ignoring click on missing row {}", index);
        return;
    };
    let is_dir = entry.is_directory();
    let name = entry.name.clone();

    with_state_and_notify(state, proxy, |s| {
        if additive && s.config.allows_multiselect() {
            match s.selection.iter().position(|&i| i == index) {
                Some(pos) => {
                    s.selection.remove(pos);
                }
                None => s.selection.push(index),
            }
        } else {
            s.selection = vec![index];
        }
        if !is_dir && s.config.mode != DialogMode::SelectFolder {
            s.typed_name = name;
        }
    });
}

/// A double click: directories are entered, files are committed.
pub fn activate_entry<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, index: usize) {
    let (Some(entry), Some(current)) = (state.entries.get(index), state.current_dir()) else {
        tracing::debug!("Ignoring activation of missing row {}", index);
        return;
    };
    let target = current.join(&entry.name);
    let name = entry.name.clone();

    if entry.is_directory() {
        if state.filter_mode.custom().is_none() && state.config.mode != DialogMode::SelectFolder {
            state.typed_name.clear();
        }
        change_directory(state, proxy, &target);
    } else if state.config.mode != DialogMode::SelectFolder {
        state.typed_name = name;
        state.selection = vec![index];
        commit(state, proxy);
    }
}

/// Enter in the filename field.
///
/// An existing directory (absolute, or relative to the current one) is
/// navigated into. Wildcard text becomes the custom filter. Anything else is
/// committed.
pub fn submit_text<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    if state.config.mode == DialogMode::SelectFolder {
        commit(state, proxy);
        return;
    }

    let text = state.typed_name.clone();
    let typed_path = Path::new(&text);
    if !text.is_empty() && typed_path.is_absolute() && state.fs.is_dir(typed_path) {
        state.typed_name.clear();
        change_directory(state, proxy, typed_path);
        return;
    }

    if !validator::is_valid(&text, true) {
        with_state_and_notify(state, proxy, |s| {
            report_error(s, proxy, &CoreError::InvalidName(text.clone()))
        });
        return;
    }

    if validator::has_wildcards(&text) {
        with_state_and_notify(state, proxy, |s| apply_custom_filter(s, proxy));
        return;
    }

    if let Some(subdir) = state
        .current_dir()
        .filter(|_| !text.is_empty())
        .map(|current| current.join(&text))
        .filter(|candidate| state.fs.is_dir(candidate))
    {
        state.typed_name.clear();
        change_directory(state, proxy, &subdir);
        return;
    }

    commit(state, proxy);
}

/// Runs the confirmation policy against the current choice.
///
/// Under multiselect, two or more selected files are committed together;
/// otherwise the filename field is the candidate.
pub fn commit<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    let Some(dir) = state.current_dir().map(Path::to_path_buf) else {
        report_error(state, proxy, &CoreError::unavailable(PathBuf::new(), None));
        return;
    };

    let names = {
        let selected = state.selected_file_names();
        if state.config.allows_multiselect() && selected.len() > 1 {
            selected
        } else {
            vec![state.typed_name.clone()]
        }
    };

    let decision = ConfirmationPolicy::new(state.fs.as_ref(), state.config.mode)
        .with_default_extension(&state.config.default_extension)
        .with_require_exists(state.config.require_exists)
        .evaluate_many(&dir, &names);

    match decision {
        Ok(Decision::Accept(paths)) => finish(state, proxy, Some(paths)),
        Ok(Decision::ConfirmOverwrite(paths)) => {
            tracing::info!("Overwrite confirmation required for {:?}", paths);
            state.pending_overwrite = Some(paths.clone());
            proxy.send_event(SessionEvent::OverwritePrompt(paths));
            notify(state, proxy);
        }
        Err(e) => {
            tracing::info!("Commit rejected: {}", e);
            with_state_and_notify(state, proxy, |s| report_error(s, proxy, &e));
        }
    }
}

pub fn accept_overwrite<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    match state.pending_overwrite.take() {
        Some(paths) => finish(state, proxy, Some(paths)),
        None => tracing::debug!("No overwrite confirmation pending"),
    }
}

/// Declining keeps the dialog open without an error.
pub fn decline_overwrite<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    if state.pending_overwrite.is_none() {
        return;
    }
    tracing::info!("Overwrite declined");
    with_state_and_notify(state, proxy, |s| s.pending_overwrite = None);
}

/// Ends the session with an empty result.
pub fn cancel<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    finish(state, proxy, None);
}

fn change_directory<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, target: &Path) {
    let target = normalize_path(target);
    let pushed = state.history.push(state.fs.as_ref(), &target).map(|_| ());
    match pushed {
        Ok(()) => {
            state.last_error = None;
            refresh_listing(state, proxy);
        }
        Err(e) => {
            tracing::info!("Navigation blocked: {}", e);
            report_error(state, proxy, &e);
        }
    }
    notify(state, proxy);
}

fn after_history_step<P: EventProxy + ?Sized>(
    state: &mut SessionState,
    proxy: &P,
    moved: Result<(), CoreError>,
    action: &str,
) {
    match moved {
        Ok(()) => {
            state.last_error = None;
            refresh_listing(state, proxy);
            notify(state, proxy);
        }
        Err(e) => tracing::debug!("{} ignored: {}", action, e),
    }
}

fn apply_custom_filter<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    state.filter_mode = FilterMode::Custom(state.typed_name.clone());
    refresh_listing(state, proxy);
}

/// Re-enumerates the current directory from scratch.
///
/// A directory that vanished since it was entered renders as an empty list
/// with an error message; it is never fatal.
fn refresh_listing<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P) {
    state.reset_listing_state();
    let Some(dir) = state.current_dir().map(Path::to_path_buf) else {
        return;
    };

    state.is_busy = true;
    proxy.send_event(SessionEvent::Busy(true));
    let listed =
        DirectoryLister::new(state.fs.as_ref()).list(&dir, &state.filters, &state.filter_mode);
    state.is_busy = false;
    proxy.send_event(SessionEvent::Busy(false));

    match listed {
        Ok(entries) => state.entries = entries,
        Err(e) => {
            tracing::warn!("Showing empty listing: {}", e);
            report_error(state, proxy, &e);
        }
    }
}

fn finish<P: EventProxy + ?Sized>(
    state: &mut SessionState,
    proxy: &P,
    paths: Option<Vec<PathBuf>>,
) {
    state.is_closed = true;
    state.pending_overwrite = None;
    state.result = paths.map(|paths| PickerResult {
        paths,
        typed_name: state.typed_name.clone(),
    });

    match &state.result {
        Some(result) => {
            state.last_error = None;
            if state.config.remember_last_directory {
                state.config.last_directory = state.history.current().map(Path::to_path_buf);
            }
            tracing::info!("Session accepted: {:?}", result.paths);
        }
        None => tracing::info!("Session cancelled"),
    }

    proxy.send_event(SessionEvent::Closed(state.result.clone()));
}

/// Lexically removes `.` and resolves `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
