//! Errors raised while provisioning a discount.

use discount_provisioner_core::{NumericFieldError, UserError};
use thiserror::Error;

use crate::shopify::AdminShopifyError;

/// Fallback message when an error renders as an empty string.
pub(super) const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// A configuration field that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Payload name of the field (e.g., `cartLinePercentage`).
    pub field: &'static str,
    /// Why the value was rejected.
    pub source: NumericFieldError,
}

/// Errors raised before or while calling the discount service.
///
/// Each one is caught by the provisioner and converted into a failed outcome.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The request carried no discount payload.
    #[error("No discount data provided")]
    MissingPayload,

    /// The payload is not a valid discount definition.
    #[error("Invalid discount data: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// The start timestamp is missing.
    #[error("startsAt is required")]
    MissingStartsAt,

    /// A timestamp could not be parsed.
    #[error("Invalid {field} timestamp: {value}")]
    InvalidTimestamp {
        /// Payload name of the field.
        field: &'static str,
        /// The rejected value.
        value: String,
    },

    /// One or more numeric configuration fields are not numbers.
    #[error("Invalid configuration: {}", format_field_errors(.0))]
    InvalidConfiguration(Vec<FieldError>),

    /// The discount service could not be reached or failed outright.
    #[error(transparent)]
    Service(#[from] AdminShopifyError),
}

impl ProvisionError {
    /// Whether the error was caused by the caller's input rather than by
    /// the service or this process.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::Service(_))
    }

    /// Convert into the errors reported to the caller.
    ///
    /// Configuration errors keep one entry per field with its path; every
    /// other error becomes a single entry with no field.
    #[must_use]
    pub fn into_user_errors(self) -> Vec<UserError> {
        match self {
            Self::InvalidConfiguration(fields) => fields
                .into_iter()
                .map(|e| {
                    UserError::new(e.source.to_string()).with_field(["configuration", e.field])
                })
                .collect(),
            other => {
                let message = other.to_string();
                let message = if message.trim().is_empty() {
                    UNEXPECTED_ERROR_MESSAGE.to_string()
                } else {
                    message
                };
                vec![UserError::new(message)]
            }
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field, e.source))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_payload_message() {
        let errors = ProvisionError::MissingPayload.into_user_errors();
        assert_eq!(errors, vec![UserError::new("No discount data provided")]);
    }

    #[test]
    fn test_configuration_errors_keep_field_paths() {
        let err = ProvisionError::InvalidConfiguration(vec![
            FieldError {
                field: "orderPercentage",
                source: NumericFieldError::NotANumber {
                    value: "ten".to_string(),
                },
            },
            FieldError {
                field: "minimumQuantity",
                source: NumericFieldError::NotFinite {
                    value: "Infinity".to_string(),
                },
            },
        ]);

        let errors = err.into_user_errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, vec!["configuration", "orderPercentage"]);
        assert_eq!(errors[0].message, "'ten' is not a number");
        assert_eq!(errors[1].field, vec!["configuration", "minimumQuantity"]);
    }

    #[test]
    fn test_service_error_is_not_input_error() {
        let err = ProvisionError::Service(AdminShopifyError::RateLimited(2));
        assert!(!err.is_input_error());
        assert!(ProvisionError::MissingPayload.is_input_error());
    }

    #[test]
    fn test_service_error_message_is_transparent() {
        let errors =
            ProvisionError::Service(AdminShopifyError::Unauthorized("expired".to_string()))
                .into_user_errors();
        assert_eq!(errors, vec![UserError::new("Unauthorized: expired")]);
    }
}
