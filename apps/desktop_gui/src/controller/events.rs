//! Events flowing from the prediction worker back to the UI thread.

use client_core::{FormView, UiState};
use crossbeam_channel::{Sender, TrySendError};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    StateChanged(UiState),
    BackendFailed(String),
}

/// Form view bound to the UI event queue. Rendering never blocks the
/// controller: a full queue drops the update and logs it.
pub struct ChannelView {
    ui_tx: Sender<UiEvent>,
}

impl ChannelView {
    pub fn new(ui_tx: Sender<UiEvent>) -> Self {
        Self { ui_tx }
    }
}

impl FormView for ChannelView {
    fn render(&self, state: &UiState) {
        match self.ui_tx.try_send(UiEvent::StateChanged(state.clone())) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                tracing::warn!("ui event queue full; dropped form state update")
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::debug!("ui event queue closed; form state update discarded")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    #[test]
    fn channel_view_forwards_states_in_order() {
        let (tx, rx) = bounded(4);
        let view = ChannelView::new(tx);
        view.render(&UiState::Submitting);
        view.render(&UiState::Error("nope".into()));

        assert_eq!(rx.try_recv(), Ok(UiEvent::StateChanged(UiState::Submitting)));
        assert_eq!(
            rx.try_recv(),
            Ok(UiEvent::StateChanged(UiState::Error("nope".into())))
        );
    }

    #[test]
    fn channel_view_tolerates_full_and_closed_queues() {
        let (tx, rx) = bounded(1);
        let view = ChannelView::new(tx);
        view.render(&UiState::Idle);
        view.render(&UiState::Submitting);
        assert_eq!(rx.len(), 1);

        drop(rx);
        view.render(&UiState::Idle);
    }
}
