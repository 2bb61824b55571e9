//! Shopify Admin API client (HIGH PRIVILEGE).
//!
//! # Security
//!
//! **This module sends the high-privilege Shopify Admin API token.**
//!
//! The token travels in an explicit [`AdminContext`](crate::provisioning::AdminContext)
//! passed to every call; the client itself holds no credentials.
//!
//! # Architecture
//!
//! - Uses the `graphql_client` query trait for typed GraphQL mutations
//! - Direct API calls to Shopify (no local database sync)
//! - Rate limiting is reported, never retried
//!
//! # Example
//!
//! ```rust,ignore
//! use discount_provisioner_admin::shopify::AdminClient;
//!
//! let client = AdminClient::new(&config.shopify, &config.discounts)?;
//!
//! // Create an automatic discount
//! let outcome = client.create_automatic_discount(&ctx, &base, &configuration).await?;
//! ```

mod admin;

pub use admin::AdminClient;

use thiserror::Error;

/// Errors that can occur when interacting with Shopify Admin API.
///
/// These are transport-level failures. Validation problems reported by
/// Shopify (`userErrors`) are not errors at this layer; they are returned
/// as a failed [`CreationOutcome`](discount_provisioner_core::CreationOutcome).
#[derive(Debug, Error)]
pub enum AdminShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON encoding or decoding failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Authentication/authorization failed.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

/// A GraphQL error returned by the Shopify Admin API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
}

impl GraphQLError {
    /// Create an error from its message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    errors
        .iter()
        .map(|e| e.message.clone())
        .collect::<Vec<_>>()
        .join("; ")
}
