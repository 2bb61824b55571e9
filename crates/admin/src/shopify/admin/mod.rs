//! Shopify Admin API GraphQL client.
//!
//! This module provides a type-safe client for interacting with the
//! Shopify Admin API using GraphQL. Credentials come from the
//! [`AdminContext`] of each call.

use std::{fmt, sync::Arc};

use graphql_client::GraphQLQuery;
use secrecy::ExposeSecret;
use serde::{Deserialize, de::DeserializeOwned};

use crate::{
    config::{DiscountSettings, ShopifyAdminConfig},
    provisioning::AdminContext,
};

use super::{AdminShopifyError, GraphQLError};

mod discounts;
pub mod queries;

/// Shopify Admin API GraphQL client.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Security
///
/// Calls carry an Admin API access token, which has HIGH PRIVILEGE access
/// to the store.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    api_version: String,
    metafield_namespace: String,
    metafield_key: String,
}

impl fmt::Debug for AdminClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminClient")
            .field("api_version", &self.inner.api_version)
            .field("metafield_namespace", &self.inner.metafield_namespace)
            .field("metafield_key", &self.inner.metafield_key)
            .finish_non_exhaustive()
    }
}

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQLErrorResponse>>,
}

#[derive(Debug, Deserialize)]
struct GraphQLErrorResponse {
    message: String,
}

impl AdminClient {
    /// Create a new Admin API client.
    ///
    /// # Arguments
    ///
    /// * `config` - Shopify Admin API configuration
    /// * `discounts` - Where created discounts store their configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        config: &ShopifyAdminConfig,
        discounts: &DiscountSettings,
    ) -> Result<Self, AdminShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AdminClientInner {
                client,
                api_version: config.api_version.clone(),
                metafield_namespace: discounts.metafield_namespace.clone(),
                metafield_key: discounts.metafield_key.clone(),
            }),
        })
    }

    /// GraphQL endpoint for a shop.
    #[must_use]
    pub fn endpoint(&self, shop: &str) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            shop, self.inner.api_version
        )
    }

    // =========================================================================
    // GraphQL Execution
    // =========================================================================

    async fn execute<Q: GraphQLQuery>(
        &self,
        ctx: &AdminContext,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, AdminShopifyError>
    where
        Q::ResponseData: DeserializeOwned,
    {
        let body = Q::build_query(variables);

        let response = self
            .inner
            .client
            .post(self.endpoint(ctx.shop()))
            .header("X-Shopify-Access-Token", ctx.access_token().expose_secret())
            .header("X-Request-Id", ctx.request_id())
            .json(&body)
            .send()
            .await?;

        // Check for rate limiting
        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(AdminShopifyError::RateLimited(retry_after));
        }

        // Check for unauthorized
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(AdminShopifyError::Unauthorized(
                "Invalid or expired access token".to_string(),
            ));
        }

        let response = response.error_for_status()?;
        let text = response.text().await?;
        parse_graphql_response(&text)
    }
}

fn parse_graphql_response<T: DeserializeOwned>(text: &str) -> Result<T, AdminShopifyError> {
    let graphql_response: GraphQLResponse<T> = serde_json::from_str(text)?;

    // Check for GraphQL errors
    if let Some(errors) = graphql_response.errors
        && !errors.is_empty()
    {
        let converted_errors: Vec<GraphQLError> = errors
            .into_iter()
            .map(|e| GraphQLError::message(e.message))
            .collect();
        return Err(AdminShopifyError::GraphQL(converted_errors));
    }

    graphql_response
        .data
        .ok_or_else(|| AdminShopifyError::GraphQL(vec![GraphQLError::message("No data in response")]))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::{num::NonZeroUsize, time::Duration};

    use super::*;

    fn client() -> AdminClient {
        let config = ShopifyAdminConfig {
            store: "test-store.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            access_token: None,
            request_timeout: Duration::from_secs(5),
        };
        let discounts = DiscountSettings {
            bulk_concurrency: NonZeroUsize::MIN,
            ..DiscountSettings::default()
        };
        AdminClient::new(&config, &discounts).unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client().endpoint("shop.myshopify.com"),
            "https://shop.myshopify.com/admin/api/2026-01/graphql.json"
        );
    }

    #[test]
    fn test_parse_graphql_errors() {
        let text = r#"{"errors":[{"message":"Throttled","locations":[{"line":1,"column":2}]}]}"#;
        let err = parse_graphql_response::<serde_json::Value>(text).unwrap_err();
        match err {
            AdminShopifyError::GraphQL(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message, "Throttled");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_missing_data() {
        let err = parse_graphql_response::<serde_json::Value>(r#"{"data":null}"#).unwrap_err();
        assert_eq!(err.to_string(), "GraphQL errors: No data in response");
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_graphql_response::<serde_json::Value>("<html>").unwrap_err();
        assert!(matches!(err, AdminShopifyError::Parse(_)));
    }

    #[test]
    fn test_debug_output() {
        let debug = format!("{:?}", client());
        assert!(debug.contains("2026-01"));
        assert!(debug.contains("function-configuration"));
    }
}
