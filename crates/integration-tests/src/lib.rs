//! Integration tests for the discount provisioner.
//!
//! # Running Tests
//!
//! ```bash
//! # Library-level tests (no network)
//! cargo test -p discount-provisioner-integration-tests
//!
//! # HTTP tests against a running server and a development store
//! cargo test -p discount-provisioner-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `provisioning` - Orchestrator behavior against a recording fake service
//! - `http` - Router behavior in-process, plus ignored end-to-end tests
//!
//! This library provides the shared test support: [`RecordingService`] and
//! payload builders.

use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

use discount_provisioner_admin::{
    provisioning::{AdminContext, DiscountService},
    shopify::{AdminShopifyError, GraphQLError},
};
use discount_provisioner_core::{BaseDiscount, CreationOutcome, DiscountConfiguration, UserError};
use secrecy::SecretString;
use serde_json::{Value, json};

/// What a recorded call created.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// Code passed to the service (`None` for automatic discounts).
    pub code: Option<String>,
    /// Definition passed to the service.
    pub base: BaseDiscount,
    /// Usage limit passed on code creation.
    pub usage_limit: Option<i64>,
    /// Once-per-customer flag passed on code creation.
    pub applies_once_per_customer: bool,
    /// Configuration passed to the service.
    pub configuration: DiscountConfiguration,
}

/// A scripted response for the next call.
#[derive(Debug, Clone)]
pub enum Scripted {
    /// The discount is created.
    Success,
    /// The service rejects the discount with these errors.
    UserErrors(Vec<UserError>),
    /// The call fails outright with this message.
    Transport(String),
}

/// Fake discount service that records every call.
///
/// Responses are taken from the script in call order; once it runs out,
/// every call succeeds.
#[derive(Debug, Default)]
pub struct RecordingService {
    calls: Mutex<Vec<RecordedCall>>,
    script: Mutex<VecDeque<Scripted>>,
}

impl RecordingService {
    /// Service that succeeds on every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Service that answers calls with `responses`, in order.
    #[must_use]
    pub fn scripted(responses: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            calls: Mutex::default(),
            script: Mutex::new(responses.into_iter().collect()),
        }
    }

    /// Every call made so far.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    /// Codes passed to the service, in call order.
    #[must_use]
    pub fn codes(&self) -> Vec<String> {
        lock(&self.calls)
            .iter()
            .filter_map(|c| c.code.clone())
            .collect()
    }

    fn record(&self, call: RecordedCall) -> Result<CreationOutcome, AdminShopifyError> {
        lock(&self.calls).push(call);
        match lock(&self.script).pop_front().unwrap_or(Scripted::Success) {
            Scripted::Success => Ok(CreationOutcome::Success),
            Scripted::UserErrors(errors) => Ok(CreationOutcome::from_errors(errors)),
            Scripted::Transport(message) => {
                Err(AdminShopifyError::GraphQL(vec![GraphQLError::message(message)]))
            }
        }
    }
}

impl DiscountService for RecordingService {
    async fn create_code_discount(
        &self,
        _ctx: &AdminContext,
        base: &BaseDiscount,
        code: &str,
        usage_limit: Option<i64>,
        applies_once_per_customer: bool,
        configuration: &DiscountConfiguration,
    ) -> Result<CreationOutcome, AdminShopifyError> {
        self.record(RecordedCall {
            code: Some(code.to_string()),
            base: base.clone(),
            usage_limit,
            applies_once_per_customer,
            configuration: configuration.clone(),
        })
    }

    async fn create_automatic_discount(
        &self,
        _ctx: &AdminContext,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
    ) -> Result<CreationOutcome, AdminShopifyError> {
        self.record(RecordedCall {
            code: None,
            base: base.clone(),
            usage_limit: None,
            applies_once_per_customer: false,
            configuration: configuration.clone(),
        })
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Context for a test shop.
#[must_use]
pub fn test_context() -> AdminContext {
    AdminContext::new(
        "test-store.myshopify.com",
        SecretString::from("shpat_test_token"),
        "test-request",
    )
}

/// A valid payload for `method`, as the discount form would submit it.
#[must_use]
pub fn discount_payload(method: &str) -> Value {
    json!({
        "title": "Integration discount",
        "method": method,
        "code": "",
        "discountClasses": ["PRODUCT"],
        "combinesWith": {
            "orderDiscounts": false,
            "productDiscounts": true,
            "shippingDiscounts": false
        },
        "usageLimit": null,
        "appliesOncePerCustomer": false,
        "startsAt": "2026-11-01T00:00:00.000Z",
        "endsAt": null,
        "configuration": {
            "cartLinePercentage": "10",
            "orderPercentage": "0",
            "deliveryPercentage": "0",
            "collectionIds": [],
            "minimumQuantity": "0",
            "quantityToDiscount": "0"
        }
    })
}
