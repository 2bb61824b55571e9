//! Application state shared across handlers.

use std::sync::Arc;

use crate::{
    config::ProvisionerConfig,
    provisioning::{DiscountProvisioner, ProvisionOptions},
    shopify::{AdminClient, AdminShopifyError},
};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ProvisionerConfig,
    provisioner: DiscountProvisioner<AdminClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Service configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the Shopify HTTP client cannot be built.
    pub fn new(config: ProvisionerConfig) -> Result<Self, AdminShopifyError> {
        let client = AdminClient::new(&config.shopify, &config.discounts)?;
        let provisioner = DiscountProvisioner::new(client, ProvisionOptions::from(&config.discounts));

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                provisioner,
            }),
        })
    }

    /// Get a reference to the service configuration.
    #[must_use]
    pub fn config(&self) -> &ProvisionerConfig {
        &self.inner.config
    }

    /// Get a reference to the discount provisioner.
    #[must_use]
    pub fn provisioner(&self) -> &DiscountProvisioner<AdminClient> {
        &self.inner.provisioner
    }
}
