//! Routes a discount to the matching creation call(s).

use std::num::NonZeroUsize;

use futures::{StreamExt, stream};
use tracing::{info, warn};

use discount_provisioner_core::{
    BaseDiscount, CreationOutcome, DiscountConfiguration, DiscountMethod, UserError,
};

use super::{
    AdminContext, CodeBatch, DiscountPayload, DiscountService, ItemReport, ProvisionError,
    ProvisionReport, RawConfiguration,
};

/// Returned when a bulk request has no prefix or no usable quantity.
pub const BULK_PRECONDITION_MESSAGE: &str =
    "Prefix and valid quantity are required for bulk creation";

/// Parse a bulk quantity the way a lenient form would.
///
/// Leading whitespace and a sign are accepted and parsing stops at the
/// first non-digit, so `"3.9"` and `"3abc"` are both 3. Missing, invalid and
/// negative values are 0. Values beyond `u32::MAX` saturate.
#[must_use]
pub fn parse_bulk_quantity(raw: Option<&str>) -> u32 {
    let Some(s) = raw.map(str::trim_start) else {
        return 0;
    };

    let (negative, digits) = s
        .strip_prefix('-')
        .map_or((false, s.strip_prefix('+').unwrap_or(s)), |rest| (true, rest));

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_u32, |acc, d| {
            acc.saturating_mul(10).saturating_add(u32::from(d - b'0'))
        });

    if negative { 0 } else { value }
}

/// Prefix and quantity of a bulk request that can be dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest<'a> {
    /// Prefix shared by every generated code.
    pub prefix: &'a str,
    /// Number of codes to create (always positive).
    pub quantity: u32,
}

impl<'a> BulkRequest<'a> {
    /// Read the bulk fields of `configuration`.
    ///
    /// Returns `None` when the prefix is empty or absent, or the quantity is
    /// not a positive integer.
    #[must_use]
    pub fn from_configuration(configuration: &'a RawConfiguration) -> Option<Self> {
        let prefix = configuration.bulk_prefix.as_deref().unwrap_or_default();
        let quantity = parse_bulk_quantity(configuration.bulk_quantity.as_deref());
        (!prefix.is_empty() && quantity > 0).then_some(Self { prefix, quantity })
    }
}

/// Report for a bulk request that failed [`BulkRequest::from_configuration`].
#[must_use]
pub fn bulk_precondition_failed() -> ProvisionReport {
    warn!("Bulk precondition failed");
    ProvisionReport::Rejected {
        outcome: CreationOutcome::single_error(UserError::new(BULK_PRECONDITION_MESSAGE)),
    }
}

/// Issues the service calls for one request.
pub struct Dispatcher<'a, S> {
    service: &'a S,
    bulk_concurrency: NonZeroUsize,
}

impl<'a, S: DiscountService> Dispatcher<'a, S> {
    /// Dispatcher over `service`; bulk items run `bulk_concurrency` at a time.
    #[must_use]
    pub const fn new(service: &'a S, bulk_concurrency: NonZeroUsize) -> Self {
        Self {
            service,
            bulk_concurrency,
        }
    }

    /// Create the discount(s) requested by `payload`.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::Service` if a code or automatic creation call
    /// fails outright. Bulk item failures never abort the batch; they are
    /// recorded on the item instead.
    pub async fn dispatch(
        &self,
        ctx: &AdminContext,
        payload: &DiscountPayload,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
    ) -> Result<ProvisionReport, ProvisionError> {
        match payload.method() {
            DiscountMethod::Code => {
                let code = payload.code.clone().unwrap_or_default();
                let outcome = self
                    .create_code(ctx, payload, base, configuration, &code)
                    .await?;
                Ok(ProvisionReport::Single {
                    method: DiscountMethod::Code,
                    item: ItemReport::new(Some(code), outcome),
                })
            }
            DiscountMethod::Automatic => {
                let outcome = self
                    .service
                    .create_automatic_discount(ctx, base, configuration)
                    .await?;
                Ok(ProvisionReport::Single {
                    method: DiscountMethod::Automatic,
                    item: ItemReport::new(None, outcome),
                })
            }
            DiscountMethod::Bulk => Ok(self.dispatch_bulk(ctx, payload, base, configuration).await),
        }
    }

    async fn dispatch_bulk(
        &self,
        ctx: &AdminContext,
        payload: &DiscountPayload,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
    ) -> ProvisionReport {
        let Some(BulkRequest { prefix, quantity }) =
            BulkRequest::from_configuration(&payload.configuration)
        else {
            return bulk_precondition_failed();
        };

        info!(
            prefix,
            quantity,
            concurrency = self.bulk_concurrency.get(),
            "Creating bulk discount codes"
        );

        let mut batch = CodeBatch::new(prefix);
        let codes = std::iter::repeat_with(|| batch.next_code())
            .take(usize::try_from(quantity).unwrap_or(usize::MAX));

        let items = stream::iter(codes)
            .map(|code| self.create_bulk_item(ctx, payload, base, configuration, code))
            .buffered(self.bulk_concurrency.get())
            .collect()
            .await;

        ProvisionReport::Bulk { items }
    }

    async fn create_bulk_item(
        &self,
        ctx: &AdminContext,
        payload: &DiscountPayload,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
        code: String,
    ) -> ItemReport {
        let outcome = match self.create_code(ctx, payload, base, configuration, &code).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(code = %code, error = %e, "Bulk item failed");
                CreationOutcome::single_error(UserError::new(e.to_string()))
            }
        };
        ItemReport::new(Some(code), outcome)
    }

    async fn create_code(
        &self,
        ctx: &AdminContext,
        payload: &DiscountPayload,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
        code: &str,
    ) -> Result<CreationOutcome, ProvisionError> {
        Ok(self
            .service
            .create_code_discount(
                ctx,
                base,
                code,
                payload.usage_limit,
                payload.applies_once_per_customer.unwrap_or(false),
                configuration,
            )
            .await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;
    use discount_provisioner_core::{DiscountCombinesWith, FunctionId};
    use secrecy::SecretString;

    use super::*;
    use crate::shopify::AdminShopifyError;

    /// Records codes; fails every code listed in `reject`.
    #[derive(Default)]
    struct FakeService {
        codes: Mutex<Vec<String>>,
        automatic_calls: Mutex<usize>,
        reject: Vec<&'static str>,
        transport_failure: bool,
    }

    impl DiscountService for FakeService {
        async fn create_code_discount(
            &self,
            _ctx: &AdminContext,
            _base: &BaseDiscount,
            code: &str,
            _usage_limit: Option<i64>,
            _applies_once_per_customer: bool,
            _configuration: &DiscountConfiguration,
        ) -> Result<CreationOutcome, AdminShopifyError> {
            self.codes.lock().unwrap().push(code.to_string());
            if self.transport_failure {
                return Err(AdminShopifyError::RateLimited(5));
            }
            if self.reject.contains(&code) {
                return Ok(CreationOutcome::single_error(
                    UserError::new("Code already exists").with_field(["code"]),
                ));
            }
            Ok(CreationOutcome::Success)
        }

        async fn create_automatic_discount(
            &self,
            _ctx: &AdminContext,
            _base: &BaseDiscount,
            _configuration: &DiscountConfiguration,
        ) -> Result<CreationOutcome, AdminShopifyError> {
            *self.automatic_calls.lock().unwrap() += 1;
            Ok(CreationOutcome::Success)
        }
    }

    fn ctx() -> AdminContext {
        AdminContext::new("test.myshopify.com", SecretString::from("token"), "req-1")
    }

    fn base() -> BaseDiscount {
        BaseDiscount {
            function_id: FunctionId::new("fn"),
            title: "Test".to_string(),
            combines_with: DiscountCombinesWith::default(),
            discount_classes: vec![],
            starts_at: Utc::now(),
            ends_at: None,
        }
    }

    fn payload(json: &str) -> DiscountPayload {
        DiscountPayload::parse(json).unwrap()
    }

    async fn run(service: &FakeService, json: &str) -> ProvisionReport {
        Dispatcher::new(service, NonZeroUsize::MIN)
            .dispatch(&ctx(), &payload(json), &base(), &DiscountConfiguration::default())
            .await
            .unwrap()
    }

    #[test]
    fn test_bulk_request_from_configuration() {
        let request = payload(r#"{"configuration":{"bulkPrefix":"VIP","bulkQuantity":"2.5"}}"#);
        assert_eq!(
            BulkRequest::from_configuration(&request.configuration),
            Some(BulkRequest {
                prefix: "VIP",
                quantity: 2
            })
        );

        let request = payload(r#"{"configuration":{"bulkPrefix":"","bulkQuantity":"5"}}"#);
        assert_eq!(BulkRequest::from_configuration(&request.configuration), None);

        let request = payload(r#"{"configuration":{"bulkPrefix":"VIP","bulkQuantity":"-1"}}"#);
        assert_eq!(BulkRequest::from_configuration(&request.configuration), None);
    }

    #[test]
    fn test_parse_bulk_quantity() {
        assert_eq!(parse_bulk_quantity(Some("3")), 3);
        assert_eq!(parse_bulk_quantity(Some(" 3")), 3);
        assert_eq!(parse_bulk_quantity(Some("3.9")), 3);
        assert_eq!(parse_bulk_quantity(Some("3abc")), 3);
        assert_eq!(parse_bulk_quantity(Some("+7")), 7);
        assert_eq!(parse_bulk_quantity(Some("-4")), 0);
        assert_eq!(parse_bulk_quantity(Some("abc")), 0);
        assert_eq!(parse_bulk_quantity(Some("")), 0);
        assert_eq!(parse_bulk_quantity(None), 0);
        assert_eq!(parse_bulk_quantity(Some("99999999999")), u32::MAX);
    }

    #[tokio::test]
    async fn test_code_mode_single_call() {
        let service = FakeService::default();
        let report = run(&service, r#"{"method":"CODE","code":"WELCOME10","configuration":{}}"#).await;

        assert_eq!(*service.codes.lock().unwrap(), vec!["WELCOME10"]);
        assert!(matches!(
            report,
            ProvisionReport::Single {
                method: DiscountMethod::Code,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_code_mode_passes_user_errors_through() {
        let service = FakeService {
            reject: vec!["WELCOME10"],
            ..FakeService::default()
        };
        let outcome = run(&service, r#"{"method":"CODE","code":"WELCOME10","configuration":{}}"#)
            .await
            .into_outcome();

        assert_eq!(
            outcome,
            CreationOutcome::single_error(UserError::new("Code already exists").with_field(["code"]))
        );
    }

    #[tokio::test]
    async fn test_automatic_mode_single_call() {
        let service = FakeService::default();
        let report = run(&service, r#"{"method":"AUTOMATIC","configuration":{}}"#).await;

        assert_eq!(*service.automatic_calls.lock().unwrap(), 1);
        assert!(service.codes.lock().unwrap().is_empty());
        assert_eq!(report.items().len(), 1);
        assert_eq!(report.items()[0].code, None);
    }

    #[tokio::test]
    async fn test_bulk_creates_quantity_codes() {
        let service = FakeService::default();
        let report = run(
            &service,
            r#"{"method":"BULK","configuration":{"bulkPrefix":"SAVE","bulkQuantity":"3"}}"#,
        )
        .await;

        let codes = service.codes.lock().unwrap().clone();
        assert_eq!(codes.len(), 3);
        assert!(codes.iter().all(|c| c.starts_with("SAVE-")));
        assert_eq!(report.succeeded(), 3);
        assert_eq!(report.into_outcome(), CreationOutcome::Success);
    }

    #[tokio::test]
    async fn test_bulk_precondition_makes_no_calls() {
        for configuration in [
            r#"{"bulkPrefix":"","bulkQuantity":"5"}"#,
            r#"{"bulkPrefix":"SAVE","bulkQuantity":"0"}"#,
            r#"{"bulkPrefix":"SAVE"}"#,
            r#"{"bulkQuantity":"5"}"#,
        ] {
            let service = FakeService::default();
            let json = format!(r#"{{"method":"BULK","configuration":{configuration}}}"#);
            let outcome = run(&service, &json).await.into_outcome();

            assert!(service.codes.lock().unwrap().is_empty());
            assert_eq!(
                outcome,
                CreationOutcome::single_error(UserError::new(BULK_PRECONDITION_MESSAGE))
            );
        }
    }

    #[tokio::test]
    async fn test_bulk_transport_failure_does_not_abort_batch() {
        let service = FakeService {
            transport_failure: true,
            ..FakeService::default()
        };
        let report = run(
            &service,
            r#"{"method":"BULK","configuration":{"bulkPrefix":"X","bulkQuantity":"4"}}"#,
        )
        .await;

        assert_eq!(service.codes.lock().unwrap().len(), 4);
        assert_eq!(report.failed(), 4);
        let errors = report.into_outcome().into_errors();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().all(|e| e.field.is_empty()));
        assert_eq!(errors[0].message, "Rate limited, retry after 5 seconds");
    }

    #[tokio::test]
    async fn test_code_transport_failure_propagates() {
        let service = FakeService {
            transport_failure: true,
            ..FakeService::default()
        };
        let result = Dispatcher::new(&service, NonZeroUsize::MIN)
            .dispatch(
                &ctx(),
                &payload(r#"{"method":"CODE","code":"A","configuration":{}}"#),
                &base(),
                &DiscountConfiguration::default(),
            )
            .await;

        assert!(matches!(result, Err(ProvisionError::Service(_))));
    }

    #[tokio::test]
    async fn test_bulk_concurrency_runs_every_item() {
        let service = FakeService::default();
        let report = Dispatcher::new(&service, NonZeroUsize::new(4).unwrap())
            .dispatch(
                &ctx(),
                &payload(r#"{"method":"BULK","configuration":{"bulkPrefix":"P","bulkQuantity":"10"}}"#),
                &base(),
                &DiscountConfiguration::default(),
            )
            .await
            .unwrap();

        let mut reported: Vec<_> = report.items().iter().filter_map(|i| i.code.clone()).collect();
        let mut called = service.codes.lock().unwrap().clone();
        reported.sort();
        called.sort();
        assert_eq!(reported.len(), 10);
        assert_eq!(reported, called);
    }
}
