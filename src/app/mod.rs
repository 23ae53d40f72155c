//! The session layer: owns one dialog's state and turns commands into events.

pub mod commands;
pub mod custom_pane;
pub mod events;
pub mod helpers;
pub mod proxy;
pub mod state;
pub mod view_model;

use crate::config::SessionConfig;
use crate::core::{CoreError, FileSystem};
use custom_pane::CustomPane;
use events::Command;
use proxy::EventProxy;
use state::{PickerResult, SessionState};
use view_model::{generate_view_model, ViewModel};

/// One picker dialog from start to accept or cancel.
///
/// The session is single-threaded; the presentation layer drives it by
/// calling [`PickerSession::dispatch`] and reacts to the events its proxy
/// receives.
pub struct PickerSession<P: EventProxy> {
    state: SessionState,
    proxy: P,
}

impl<P: EventProxy> PickerSession<P> {
    pub fn new(config: SessionConfig, proxy: P) -> Self {
        Self {
            state: SessionState::new(config),
            proxy,
        }
    }

    pub fn with_file_system(config: SessionConfig, fs: Box<dyn FileSystem>, proxy: P) -> Self {
        Self {
            state: SessionState::with_file_system(config, fs),
            proxy,
        }
    }

    /// Enters the start directory and publishes the first view.
    pub fn start(&mut self) -> Result<(), CoreError> {
        commands::start(&mut self.state, &self.proxy)
    }

    pub fn dispatch(&mut self, command: Command) {
        commands::handle_command(&mut self.state, &self.proxy, command);
    }

    pub fn view(&self) -> ViewModel {
        generate_view_model(&self.state)
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.state.config
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed
    }

    pub fn result(&self) -> Option<&PickerResult> {
        self.state.result.as_ref()
    }

    /// Consumes the session, returning its final configuration (with the
    /// remembered directory updated) and result.
    pub fn finish(self) -> (SessionConfig, Option<PickerResult>) {
        (self.state.config, self.state.result)
    }

    pub fn attach_custom_pane<T: CustomPane>(&mut self, pane: T) {
        self.state.custom_pane = Some(Box::new(pane));
    }

    pub fn custom_pane_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.state
            .custom_pane
            .as_deref_mut()
            .and_then(|pane| pane.as_any_mut().downcast_mut::<T>())
    }
}
