//! Contains helper functions to reduce boilerplate code in other `app` modules.

use super::events::SessionEvent;
use super::proxy::EventProxy;
use super::state::SessionState;
use super::view_model::generate_view_model;
use crate::core::CoreError;

/// Performs a mutation on the `SessionState` and then automatically sends a
/// `StateUpdate` event to the UI.
pub fn with_state_and_notify<F, P: EventProxy + ?Sized>(
    state: &mut SessionState,
    proxy: &P,
    update_fn: F,
) where
    F: FnOnce(&mut SessionState),
{
    update_fn(state);
    notify(state, proxy);
}

/// Sends the current view model to the UI.
pub fn notify<P: EventProxy + ?Sized>(state: &SessionState, proxy: &P) {
    let view = generate_view_model(state);
    proxy.send_event(SessionEvent::StateUpdate(Box::new(view)));
}

/// Records a rejected action on the state and reports it to the UI.
pub fn report_error<P: EventProxy + ?Sized>(state: &mut SessionState, proxy: &P, error: &CoreError) {
    let message = error.to_string();
    state.last_error = Some(message.clone());
    proxy.send_event(SessionEvent::Error(message));
}
