use thiserror::Error;

use crate::domain::{DENSITY_RANGE, STIFFNESS_RANGE};

/// Shown when a request fails without a message of its own.
pub const GENERIC_REQUEST_FAILURE: &str = "An error occurred while making the prediction";
/// Shown for a non-2xx response whose body carries no `error` field.
pub const DEFAULT_SERVER_FAILURE: &str = "Prediction failed";

/// Rejections raised locally, before any request is built. The display text
/// is exactly what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Stiffness must be between 10 and 100")]
    StiffnessOutOfRange { value: i64 },
    #[error("Density must be between 5 and 50")]
    DensityOutOfRange { value: i64 },
}

impl ValidationError {
    pub fn stiffness(value: i64) -> Option<Self> {
        (!STIFFNESS_RANGE.contains(&value)).then_some(Self::StiffnessOutOfRange { value })
    }

    pub fn density(value: i64) -> Option<Self> {
        (!DENSITY_RANGE.contains(&value)).then_some(Self::DensityOutOfRange { value })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error("prediction request failed: {0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("malformed prediction response: {0}")]
    MalformedBody(String),
}

impl RequestError {
    /// Builds the error for a non-2xx response from its optional `error` field.
    pub fn from_status(status: u16, server_message: Option<String>) -> Self {
        Self::Server {
            status,
            message: server_message
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| DEFAULT_SERVER_FAILURE.to_string()),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            RequestError::Server { message, .. } if !message.is_empty() => message.clone(),
            _ => GENERIC_REQUEST_FAILURE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Request(#[from] RequestError),
}

impl FormError {
    pub fn user_message(&self) -> String {
        match self {
            FormError::Validation(err) => err.to_string(),
            FormError::Request(err) => err.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_error_prefers_body_message() {
        let err = RequestError::from_status(503, Some("model unavailable".to_string()));
        assert_eq!(err.user_message(), "model unavailable");
    }

    #[test]
    fn server_error_without_body_message_uses_default() {
        let err = RequestError::from_status(500, None);
        assert_eq!(err.user_message(), DEFAULT_SERVER_FAILURE);
    }

    #[test]
    fn empty_server_message_counts_as_missing() {
        let err = RequestError::from_status(500, Some(String::new()));
        assert_eq!(err.user_message(), DEFAULT_SERVER_FAILURE);
    }

    #[test]
    fn transport_and_body_failures_use_generic_text() {
        assert_eq!(
            RequestError::Transport("connection refused".into()).user_message(),
            GENERIC_REQUEST_FAILURE
        );
        assert_eq!(
            RequestError::MalformedBody("expected value".into()).user_message(),
            GENERIC_REQUEST_FAILURE
        );
    }

    #[test]
    fn validation_messages_are_user_facing() {
        assert_eq!(
            FormError::from(ValidationError::MissingFields).user_message(),
            "Please fill in all fields"
        );
        assert_eq!(
            ValidationError::stiffness(9).map(|e| e.to_string()).as_deref(),
            Some("Stiffness must be between 10 and 100")
        );
        assert_eq!(ValidationError::density(50), None);
    }
}
