//! Top-level provisioning entry point.

use std::num::NonZeroUsize;

use tracing::{Span, error, info, instrument, warn};

use discount_provisioner_core::{CreationOutcome, DiscountMethod, FunctionId};

use super::{
    AdminContext, BulkRequest, DiscountPayload, DiscountService, Dispatcher, ProvisionError,
    ProvisionReport, bulk_precondition_failed, normalize,
};
use crate::config::DiscountSettings;

/// Tunables for [`DiscountProvisioner`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionOptions {
    /// Bulk items in flight at once (1 = strictly sequential).
    pub bulk_concurrency: NonZeroUsize,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            bulk_concurrency: NonZeroUsize::MIN,
        }
    }
}

impl From<&DiscountSettings> for ProvisionOptions {
    fn from(settings: &DiscountSettings) -> Self {
        Self {
            bulk_concurrency: settings.bulk_concurrency,
        }
    }
}

/// Provisions discounts through a [`DiscountService`].
#[derive(Debug, Clone)]
pub struct DiscountProvisioner<S> {
    service: S,
    options: ProvisionOptions,
}

impl<S: DiscountService> DiscountProvisioner<S> {
    /// Create a provisioner.
    #[must_use]
    pub const fn new(service: S, options: ProvisionOptions) -> Self {
        Self { service, options }
    }

    /// The underlying discount service.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Provision the discount(s) described by a serialized payload.
    ///
    /// Never fails. Errors are logged here and returned as a rejected
    /// report, so callers only need [`ProvisionReport::into_outcome`].
    #[instrument(
        skip(self, ctx, payload),
        fields(
            request_id = %ctx.request_id(),
            shop = %ctx.shop(),
            function_id = %function_id,
            method = tracing::field::Empty,
        )
    )]
    pub async fn provision(
        &self,
        ctx: &AdminContext,
        function_id: &FunctionId,
        payload: Option<&str>,
    ) -> ProvisionReport {
        match self.try_provision(ctx, function_id, payload).await {
            Ok(report) => {
                info!(
                    succeeded = report.succeeded(),
                    failed = report.failed(),
                    rejected = report.is_rejected(),
                    "Discount provisioning finished"
                );
                report
            }
            Err(e) => {
                if e.is_input_error() {
                    warn!(error = %e, "Discount payload rejected");
                } else {
                    error!(error = %e, "Discount provisioning failed");
                    sentry::capture_error(&e);
                }
                ProvisionReport::Rejected {
                    outcome: CreationOutcome::from_errors(e.into_user_errors()),
                }
            }
        }
    }

    async fn try_provision(
        &self,
        ctx: &AdminContext,
        function_id: &FunctionId,
        payload: Option<&str>,
    ) -> Result<ProvisionReport, ProvisionError> {
        let raw = payload
            .filter(|p| !p.trim().is_empty())
            .ok_or(ProvisionError::MissingPayload)?;
        let payload = DiscountPayload::parse(raw)?;

        let method = payload.method();
        Span::current().record("method", method.as_str());

        // A failed bulk precondition is the only error reported for the request.
        if method == DiscountMethod::Bulk
            && BulkRequest::from_configuration(&payload.configuration).is_none()
        {
            return Ok(bulk_precondition_failed());
        }

        let base = payload.base_discount(function_id.clone())?;
        let configuration = normalize(&payload.configuration)?;

        Dispatcher::new(&self.service, self.options.bulk_concurrency)
            .dispatch(ctx, &payload, &base, &configuration)
            .await
    }
}
