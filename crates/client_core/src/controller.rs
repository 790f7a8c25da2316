//! Submit handling for the prediction form: validate, request, render.

use std::sync::{Mutex, MutexGuard, PoisonError};

use shared::{
    error::{RequestError, ValidationError},
    form::FormInput,
};
use tracing::{error, info, warn};

use crate::{
    state::{ResultView, UiState},
    PredictionClient,
};

/// Render sink for form state. Implementations are bound to their widgets
/// once, up front, and must not block: `render` runs while the controller
/// holds its state lock.
pub trait FormView: Send + Sync {
    fn render(&self, state: &UiState);
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was still in flight; nothing was rendered.
    Rejected,
    Invalid(ValidationError),
    Displayed(ResultView),
    Failed(RequestError),
}

#[derive(Default)]
struct ControllerState {
    ui: UiState,
    in_flight: bool,
}

pub struct FormController<C, V> {
    client: C,
    view: V,
    state: Mutex<ControllerState>,
}

impl<C: PredictionClient, V: FormView> FormController<C, V> {
    pub fn new(client: C, view: V) -> Self {
        let controller = Self {
            client,
            view,
            state: Mutex::new(ControllerState::default()),
        };
        controller.view.render(&UiState::Idle);
        controller
    }

    pub fn state(&self) -> UiState {
        self.lock_state().ui.clone()
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock_state().in_flight
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub async fn submit(&self, input: FormInput) -> SubmitOutcome {
        let request = {
            let mut state = self.lock_state();
            if state.in_flight {
                warn!("prediction already in flight; rejecting overlapping submission");
                return SubmitOutcome::Rejected;
            }

            self.transition(&mut state, UiState::Idle);

            match input.validate() {
                Ok(request) => {
                    state.in_flight = true;
                    self.transition(&mut state, UiState::Submitting);
                    request
                }
                Err(err) => {
                    warn!("prediction form rejected: {err}");
                    self.transition(&mut state, UiState::Error(err.to_string()));
                    return SubmitOutcome::Invalid(err);
                }
            }
        };

        let mut teardown = InFlightTeardown {
            controller: self,
            armed: true,
        };

        info!(
            stiffness = request.stiffness,
            density = request.density,
            material = %request.material,
            "requesting structure prediction"
        );
        let result = self.client.predict(&request).await;

        teardown.armed = false;
        let mut state = self.lock_state();
        state.in_flight = false;
        match result {
            Ok(prediction) => {
                info!(
                    structure = %prediction.recommended_structure,
                    confidence = prediction.confidence,
                    "prediction received"
                );
                let view = ResultView::new(&prediction.recommended_structure, prediction.confidence);
                self.transition(&mut state, UiState::Result(view.clone()));
                SubmitOutcome::Displayed(view)
            }
            Err(err) => {
                error!("prediction request failed: {err}");
                self.transition(&mut state, UiState::Error(err.user_message()));
                SubmitOutcome::Failed(err)
            }
        }
    }

    fn transition(&self, state: &mut ControllerState, next: UiState) {
        state.ui = next;
        self.view.render(&state.ui);
    }

    fn lock_state(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Restores the idle control if a submission future is dropped while its
/// request is outstanding.
struct InFlightTeardown<'a, C: PredictionClient, V: FormView> {
    controller: &'a FormController<C, V>,
    armed: bool,
}

impl<C: PredictionClient, V: FormView> Drop for InFlightTeardown<'_, C, V> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        warn!("prediction submission dropped before completion");
        let mut state = self.controller.lock_state();
        state.in_flight = false;
        self.controller.transition(&mut state, UiState::Idle);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
