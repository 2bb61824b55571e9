//! Explicit request context for Admin API calls.

use secrecy::SecretString;

/// Authentication and correlation context for one incoming request.
///
/// Threaded through every discount service call so nothing depends on
/// ambient session state. Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct AdminContext {
    shop: String,
    access_token: SecretString,
    request_id: String,
}

impl AdminContext {
    /// Create a context for a shop.
    ///
    /// # Arguments
    ///
    /// * `shop` - Shop domain (e.g., `your-store.myshopify.com`)
    /// * `access_token` - Admin API access token for that shop
    /// * `request_id` - Correlation ID recorded on logs and errors
    #[must_use]
    pub fn new(
        shop: impl Into<String>,
        access_token: SecretString,
        request_id: impl Into<String>,
    ) -> Self {
        Self {
            shop: shop.into(),
            access_token,
            request_id: request_id.into(),
        }
    }

    /// Shop domain the request targets.
    #[must_use]
    pub fn shop(&self) -> &str {
        &self.shop
    }

    /// Admin API access token.
    #[must_use]
    pub const fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    /// Correlation ID for this request.
    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl std::fmt::Debug for AdminContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminContext")
            .field("shop", &self.shop)
            .field("access_token", &"[REDACTED]")
            .field("request_id", &self.request_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_token() {
        let ctx = AdminContext::new(
            "test.myshopify.com",
            SecretString::from("shpat_do_not_log"),
            "req-1",
        );

        let debug_output = format!("{ctx:?}");
        assert!(debug_output.contains("test.myshopify.com"));
        assert!(debug_output.contains("req-1"));
        assert!(!debug_output.contains("shpat_do_not_log"));
    }
}
