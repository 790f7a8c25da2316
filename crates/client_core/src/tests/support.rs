//! Test doubles shared by the controller and HTTP client tests.

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use shared::{
    error::RequestError,
    protocol::{PredictionRequest, PredictionResult},
};
use tokio::sync::{Notify, Semaphore};

use crate::{controller::FormView, state::UiState, PredictionClient};

#[derive(Default)]
pub struct RecordingView {
    states: Mutex<Vec<UiState>>,
}

impl RecordingView {
    pub fn states(&self) -> Vec<UiState> {
        self.states.lock().expect("view lock").clone()
    }

    pub fn last(&self) -> UiState {
        self.states().last().cloned().unwrap_or_default()
    }

    pub fn saw_submitting(&self) -> bool {
        self.states().contains(&UiState::Submitting)
    }
}

impl FormView for RecordingView {
    fn render(&self, state: &UiState) {
        self.states.lock().expect("view lock").push(state.clone());
    }
}

pub fn prediction(structure: &str, confidence: f64) -> PredictionResult {
    PredictionResult {
        recommended_structure: structure.to_string(),
        confidence,
    }
}

/// In-memory client answering from a queue. When gated, each call waits for
/// [`ScriptedClient::release`] before answering.
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<PredictionResult, RequestError>>>,
    requests: Mutex<Vec<PredictionRequest>>,
    calls: AtomicUsize,
    gate: Option<Semaphore>,
    entered: Notify,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<PredictionResult, RequestError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
            gate: None,
            entered: Notify::new(),
        }
    }

    pub fn gated(responses: Vec<Result<PredictionResult, RequestError>>) -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new(responses)
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }
}

#[async_trait]
impl PredictionClient for ScriptedClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, RequestError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .expect("requests lock")
            .push(request.clone());
        self.entered.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate open").forget();
        }

        self.responses
            .lock()
            .expect("responses lock")
            .pop_front()
            .unwrap_or_else(|| Err(RequestError::Transport("no scripted response".into())))
    }
}
