//! Discount provisioning: turns a submitted discount definition into one or
//! more Shopify creation calls and a single outcome.
//!
//! # Flow
//!
//! ```text
//! payload ──► payload::DiscountPayload ──► normalizer ──► dispatcher ──► aggregator
//!                                                            │
//!                                          codes (bulk) ◄────┘
//! ```
//!
//! [`DiscountProvisioner::provision`] is the single entry point. It never
//! fails: every error is logged once and converted into a
//! [`CreationOutcome`](discount_provisioner_core::CreationOutcome).

mod aggregator;
mod codes;
mod context;
mod dispatcher;
mod error;
mod normalizer;
mod orchestrator;
mod payload;

pub use aggregator::{ItemReport, ProvisionReport, aggregate};
pub use codes::{CodeBatch, MAX_SUFFIX, MIN_SUFFIX, generate_code};
pub use context::AdminContext;
pub use dispatcher::{
    BULK_PRECONDITION_MESSAGE, BulkRequest, Dispatcher, bulk_precondition_failed,
    parse_bulk_quantity,
};
pub use error::{FieldError, ProvisionError};
pub use normalizer::normalize;
pub use orchestrator::{DiscountProvisioner, ProvisionOptions};
pub use payload::{DiscountPayload, RawConfiguration};

use std::future::Future;

use discount_provisioner_core::{BaseDiscount, CreationOutcome, DiscountConfiguration};

use crate::shopify::AdminShopifyError;

/// The external discount-creation service.
///
/// `Ok` carries the service's verdict, including its validation errors.
/// `Err` is reserved for failures to get a verdict at all (transport,
/// authentication, malformed responses).
pub trait DiscountService: Send + Sync {
    /// Create a discount redeemed with `code`.
    fn create_code_discount(
        &self,
        ctx: &AdminContext,
        base: &BaseDiscount,
        code: &str,
        usage_limit: Option<i64>,
        applies_once_per_customer: bool,
        configuration: &DiscountConfiguration,
    ) -> impl Future<Output = Result<CreationOutcome, AdminShopifyError>> + Send;

    /// Create a discount that applies without a code.
    fn create_automatic_discount(
        &self,
        ctx: &AdminContext,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
    ) -> impl Future<Output = Result<CreationOutcome, AdminShopifyError>> + Send;
}
