//! Validation status for parts, videos and cabinets.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of validating a part, a video or a whole cabinet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationStatus {
    Valid,
    Warning { message: String },
    Error { message: String },
    /// A likely file for something with no assignment.
    Suggestion { filename: String, confidence: f32 },
}

impl ValidationStatus {
    pub fn warning(message: impl Into<String>) -> Self {
        ValidationStatus::Warning {
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ValidationStatus::Error {
            message: message.into(),
        }
    }

    /// Build a suggestion. Confidence is clamped to `0.0..=1.0`.
    pub fn suggestion(filename: impl Into<String>, confidence: f32) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        ValidationStatus::Suggestion {
            filename: filename.into(),
            confidence,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationStatus::Warning { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ValidationStatus::Error { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationStatus::Warning { message } | ValidationStatus::Error { message } => {
                Some(message)
            }
            _ => None,
        }
    }

    /// Short label: `valid`, `warning`, `error` or `suggestion`.
    pub fn label(&self) -> &'static str {
        match self {
            ValidationStatus::Valid => "valid",
            ValidationStatus::Warning { .. } => "warning",
            ValidationStatus::Error { .. } => "error",
            ValidationStatus::Suggestion { .. } => "suggestion",
        }
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationStatus::Valid => write!(f, "valid"),
            ValidationStatus::Warning { message } => write!(f, "warning: {}", message),
            ValidationStatus::Error { message } => write!(f, "error: {}", message),
            ValidationStatus::Suggestion {
                filename,
                confidence,
            } => write!(f, "suggestion: {} ({:.0}%)", filename, confidence * 100.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestion_confidence_clamped() {
        let high = ValidationStatus::suggestion("side.png", 1.7);
        let low = ValidationStatus::suggestion("side.png", -0.2);
        let nan = ValidationStatus::suggestion("side.png", f32::NAN);

        for (status, expected) in [(high, 1.0), (low, 0.0), (nan, 0.0)] {
            match status {
                ValidationStatus::Suggestion { confidence, .. } => assert_eq!(confidence, expected),
                other => panic!("expected suggestion, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_predicates_and_messages() {
        let error = ValidationStatus::error("Art file not found: bezel.png");
        assert!(error.is_error());
        assert!(!error.is_valid());
        assert_eq!(error.message(), Some("Art file not found: bezel.png"));
        assert_eq!(error.label(), "error");

        assert!(ValidationStatus::warning("x").is_warning());
        assert_eq!(ValidationStatus::Valid.message(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValidationStatus::Valid.to_string(), "valid");
        assert_eq!(
            ValidationStatus::suggestion("left.png", 0.6).to_string(),
            "suggestion: left.png (60%)"
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ValidationStatus::error("missing")).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "error", "message": "missing" }));
    }
}
