//! Raw form input and the local checks run before a prediction request is built.

use crate::{error::ValidationError, protocol::PredictionRequest};

/// Field values exactly as typed or selected by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub stiffness: String,
    pub density: String,
    pub material: String,
}

impl FormInput {
    pub fn new(
        stiffness: impl Into<String>,
        density: impl Into<String>,
        material: impl Into<String>,
    ) -> Self {
        Self {
            stiffness: stiffness.into(),
            density: density.into(),
            material: material.into(),
        }
    }

    /// Runs the checks in order and stops at the first failure: presence,
    /// then the stiffness range, then the density range.
    pub fn validate(&self) -> Result<PredictionRequest, ValidationError> {
        let stiffness = parse_leading_int(&self.stiffness).filter(|v| *v != 0);
        let density = parse_leading_int(&self.density).filter(|v| *v != 0);

        let (Some(stiffness), Some(density)) = (stiffness, density) else {
            return Err(ValidationError::MissingFields);
        };
        if self.material.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        if let Some(err) = ValidationError::stiffness(stiffness) {
            return Err(err);
        }
        if let Some(err) = ValidationError::density(density) {
            return Err(err);
        }

        Ok(PredictionRequest {
            stiffness,
            density,
            material: self.material.clone(),
        })
    }
}

/// Base-10 leading-integer parse: skips leading whitespace, accepts one sign,
/// then consumes digits up to the first non-digit. Returns `None` when no
/// digit was consumed. Out-of-range magnitudes saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    for digit in digits.bytes().map(|b| i64::from(b - b'0')) {
        value = value.saturating_mul(10).saturating_add(digit);
    }
    Some(if negative { -value } else { value })
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
