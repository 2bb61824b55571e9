//! Creation outcomes reported back to callers.

use serde::{Deserialize, Serialize};

/// A single error reported for a creation request.
///
/// Mirrors Shopify's `userErrors` shape so service-side and local errors
/// reach callers identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Human-readable error message.
    pub message: String,
    /// Path to the offending input field (empty when not field-specific).
    #[serde(default)]
    pub field: Vec<String>,
    /// Machine-readable error code, when the service provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl UserError {
    /// Create an error that is not tied to any input field.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Vec::new(),
            code: None,
        }
    }

    /// Attach a field path.
    #[must_use]
    pub fn with_field<I, S>(mut self, field: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field = field.into_iter().map(Into::into).collect();
        self
    }

    /// Attach an error code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.field.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.field.join("."), self.message)
        }
    }
}

/// Result of one creation call, or of a whole request after aggregation.
///
/// Serializes as `{"success": true}` or `{"errors": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OutcomeRepr", into = "OutcomeRepr")]
pub enum CreationOutcome {
    /// The discount was created.
    Success,
    /// The discount was rejected; errors are in report order.
    Failure(Vec<UserError>),
}

impl CreationOutcome {
    /// Build an outcome from an error list; an empty list is a success.
    #[must_use]
    pub fn from_errors(errors: Vec<UserError>) -> Self {
        if errors.is_empty() {
            Self::Success
        } else {
            Self::Failure(errors)
        }
    }

    /// Failure with exactly one error.
    #[must_use]
    pub fn single_error(error: UserError) -> Self {
        Self::Failure(vec![error])
    }

    /// Whether the outcome is a success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Errors carried by the outcome (empty on success).
    #[must_use]
    pub fn errors(&self) -> &[UserError] {
        match self {
            Self::Success => &[],
            Self::Failure(errors) => errors,
        }
    }

    /// Consume the outcome, returning its errors.
    #[must_use]
    pub fn into_errors(self) -> Vec<UserError> {
        match self {
            Self::Success => Vec::new(),
            Self::Failure(errors) => errors,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct OutcomeRepr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<UserError>>,
}

impl From<OutcomeRepr> for CreationOutcome {
    fn from(repr: OutcomeRepr) -> Self {
        Self::from_errors(repr.errors.unwrap_or_default())
    }
}

impl From<CreationOutcome> for OutcomeRepr {
    fn from(outcome: CreationOutcome) -> Self {
        match outcome {
            CreationOutcome::Success => Self {
                success: Some(true),
                errors: None,
            },
            CreationOutcome::Failure(errors) => Self {
                success: None,
                errors: Some(errors),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serializes_as_flag() {
        let json = serde_json::to_value(CreationOutcome::Success).expect("serialize");
        assert_eq!(json, serde_json::json!({ "success": true }));
    }

    #[test]
    fn test_failure_serializes_errors_without_missing_code() {
        let outcome = CreationOutcome::single_error(
            UserError::new("Code already exists").with_field(["code"]),
        );
        let json = serde_json::to_value(outcome).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "errors": [{ "message": "Code already exists", "field": ["code"] }]
            })
        );
    }

    #[test]
    fn test_deserialize_service_shape() {
        let outcome: CreationOutcome = serde_json::from_str(
            r#"{"errors":[{"message":"Too long","field":["title"],"code":"TOO_LONG"}]}"#,
        )
        .expect("deserialize");

        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.errors()[0].code.as_deref(), Some("TOO_LONG"));
    }

    #[test]
    fn test_from_errors_empty_is_success() {
        assert!(CreationOutcome::from_errors(Vec::new()).is_success());
        assert!(!CreationOutcome::from_errors(vec![UserError::new("x")]).is_success());
    }

    #[test]
    fn test_user_error_display() {
        assert_eq!(UserError::new("Boom").to_string(), "Boom");
        assert_eq!(
            UserError::new("is invalid")
                .with_field(["configuration", "orderPercentage"])
                .to_string(),
            "configuration.orderPercentage: is invalid"
        );
    }
}
