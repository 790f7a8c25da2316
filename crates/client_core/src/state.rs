//! Explicit UI state for the prediction form. Every visible property of the
//! form is derived from a single [`UiState`] value.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub structure: String,
    pub confidence_text: String,
    pub description: String,
}

impl ResultView {
    pub fn new(structure: &str, confidence: f64) -> Self {
        Self {
            structure: structure.to_string(),
            confidence_text: format_confidence(confidence),
            description: shared::domain::structure_description(structure).to_string(),
        }
    }
}

/// `0.87` -> `"87%"`. Halves round away from zero.
pub fn format_confidence(confidence: f64) -> String {
    format!("{}%", (confidence * 100.0).round() as i64)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    Submitting,
    Result(ResultView),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitLabel {
    Idle,
    Submitting,
}

impl SubmitLabel {
    pub fn text(self) -> &'static str {
        match self {
            SubmitLabel::Idle => "Predict Structure",
            SubmitLabel::Submitting => "Predicting...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Result,
    Error,
}

impl UiState {
    pub fn submit_enabled(&self) -> bool {
        !matches!(self, UiState::Submitting)
    }

    pub fn submit_label(&self) -> SubmitLabel {
        match self {
            UiState::Submitting => SubmitLabel::Submitting,
            _ => SubmitLabel::Idle,
        }
    }

    pub fn result(&self) -> Option<&ResultView> {
        match self {
            UiState::Result(view) => Some(view),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UiState::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Panel revealed by this state, which the view scrolls into view.
    pub fn revealed_panel(&self) -> Option<Panel> {
        match self {
            UiState::Result(_) => Some(Panel::Result),
            UiState::Error(_) => Some(Panel::Error),
            UiState::Idle | UiState::Submitting => None,
        }
    }
}
