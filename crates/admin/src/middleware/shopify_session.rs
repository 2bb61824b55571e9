//! Extractor that builds the Admin API context for a request.
//!
//! The access token comes from the `X-Shopify-Access-Token` header when the
//! embedding app forwards one, otherwise from `SHOPIFY_ADMIN_ACCESS_TOKEN`.

use axum::{extract::FromRequestParts, http::request::Parts};
use secrecy::SecretString;
use uuid::Uuid;

use super::RequestId;
use crate::{error::AppError, provisioning::AdminContext, state::AppState};

/// Header carrying a per-request Admin API access token.
pub const SHOPIFY_ACCESS_TOKEN_HEADER: &str = "x-shopify-access-token";

impl FromRequestParts<AppState> for AdminContext {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let shopify = &state.config().shopify;

        let access_token = parts
            .headers
            .get(SHOPIFY_ACCESS_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|s| !s.trim().is_empty())
            .map(|s| SecretString::from(s.to_string()))
            .or_else(|| shopify.access_token.clone())
            .ok_or_else(|| AppError::Unauthorized("Missing Shopify access token".to_string()))?;

        let request_id = parts
            .extensions
            .get::<RequestId>()
            .map_or_else(|| Uuid::new_v4().to_string(), |id| id.0.clone());

        Ok(Self::new(shopify.store.clone(), access_token, request_id))
    }
}
