use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::RequestError,
    protocol::{interpret_response, PredictionRequest, PredictionResult},
};
use tracing::debug;

pub mod config;
pub mod controller;
pub mod state;

pub use config::{load_settings, ClientSettings};
pub use controller::{FormController, FormView, SubmitOutcome};
pub use state::{Panel, ResultView, SubmitLabel, UiState};

/// Seam between the form controller and the prediction service.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, RequestError>;
}

/// Posts prediction requests as JSON to `<server_url>/predict`.
#[derive(Debug, Clone)]
pub struct HttpPredictionClient {
    http: Client,
    endpoint: String,
}

impl HttpPredictionClient {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::from_settings(&ClientSettings {
            server_url: server_url.to_string(),
            ..ClientSettings::default()
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let endpoint = settings.predict_endpoint()?;
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("failed to build HTTP client")?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult, RequestError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| RequestError::Transport(err.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "prediction response received");

        interpret_response(status.as_u16(), &body)
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
