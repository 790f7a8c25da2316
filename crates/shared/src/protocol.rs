use serde::{Deserialize, Serialize};

use crate::error::RequestError;

pub const PREDICT_PATH: &str = "/predict";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub stiffness: i64,
    pub density: i64,
    pub material: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub recommended_structure: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Interprets a `/predict` response. The body is parsed as JSON before the
/// status is looked at, so an unparseable error page is reported as a
/// malformed body rather than a server error.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<PredictionResult, RequestError> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|err| RequestError::MalformedBody(err.to_string()))?;

    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        return Err(RequestError::from_status(status, message));
    }

    serde_json::from_value(value).map_err(|err| RequestError::MalformedBody(err.to_string()))
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
