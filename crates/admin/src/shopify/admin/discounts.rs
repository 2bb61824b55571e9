//! Function-backed discount creation for the Admin API.

use tracing::{info, instrument};

use discount_provisioner_core::{
    BaseDiscount, CreationOutcome, DiscountConfiguration, DiscountNodeId, UserError,
};

use super::{
    AdminClient, AdminShopifyError, GraphQLError,
    queries::{
        DiscountAutomaticAppCreate, DiscountCodeAppCreate,
        common::{CreatedAppDiscount, DiscountUserError, MetafieldInput},
        discount_automatic_app_create, discount_code_app_create,
    },
};
use crate::provisioning::{AdminContext, DiscountService};

/// Convert Shopify user errors to domain errors.
fn convert_user_errors(errors: Vec<DiscountUserError>) -> Vec<UserError> {
    errors
        .into_iter()
        .map(|e| {
            let error = UserError::new(e.message).with_field(e.field.unwrap_or_default());
            match e.code {
                Some(code) => error.with_code(code),
                None => error,
            }
        })
        .collect()
}

/// Map a mutation payload to an outcome.
///
/// User errors win over a returned discount; a payload with neither is
/// treated as a failed call.
fn payload_outcome(
    created: Option<CreatedAppDiscount>,
    user_errors: Vec<DiscountUserError>,
) -> Result<CreationOutcome, AdminShopifyError> {
    if !user_errors.is_empty() {
        return Ok(CreationOutcome::Failure(convert_user_errors(user_errors)));
    }

    let discount = created.ok_or_else(|| {
        AdminShopifyError::GraphQL(vec![GraphQLError::message("No discount returned from create")])
    })?;
    let discount_id = DiscountNodeId::new(discount.discount_id);
    info!(discount_id = %discount_id, "Discount created");
    Ok(CreationOutcome::Success)
}

impl AdminClient {
    /// Build the metafield that stores the function configuration.
    fn configuration_metafield(
        &self,
        configuration: &DiscountConfiguration,
    ) -> Result<MetafieldInput, AdminShopifyError> {
        Ok(MetafieldInput {
            namespace: self.inner.metafield_namespace.clone(),
            key: self.inner.metafield_key.clone(),
            type_: "json".to_string(),
            value: serde_json::to_string(configuration)?,
        })
    }
}

impl DiscountService for AdminClient {
    /// Create a code discount backed by a discount function.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. Validation problems are
    /// returned as a failed outcome.
    #[instrument(skip(self, ctx, base, configuration), fields(request_id = %ctx.request_id(), function_id = %base.function_id))]
    async fn create_code_discount(
        &self,
        ctx: &AdminContext,
        base: &BaseDiscount,
        code: &str,
        usage_limit: Option<i64>,
        applies_once_per_customer: bool,
        configuration: &DiscountConfiguration,
    ) -> Result<CreationOutcome, AdminShopifyError> {
        use discount_code_app_create::{DiscountCodeAppInput, Variables};

        let variables = Variables {
            code_app_discount: DiscountCodeAppInput {
                title: base.title.clone(),
                function_id: base.function_id.to_string(),
                code: code.to_string(),
                starts_at: base.starts_at.to_rfc3339(),
                ends_at: base.ends_at.map(|t| t.to_rfc3339()),
                usage_limit,
                applies_once_per_customer,
                combines_with: base.combines_with.into(),
                discount_classes: base.discount_classes.clone(),
                metafields: vec![self.configuration_metafield(configuration)?],
            },
        };

        let response = self.execute::<DiscountCodeAppCreate>(ctx, variables).await?;

        let payload = response.discount_code_app_create.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError::message(
                "No response from discountCodeAppCreate",
            )])
        })?;

        payload_outcome(payload.code_app_discount, payload.user_errors)
    }

    /// Create an automatic discount backed by a discount function.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails. Validation problems are
    /// returned as a failed outcome.
    #[instrument(skip(self, ctx, base, configuration), fields(request_id = %ctx.request_id(), function_id = %base.function_id))]
    async fn create_automatic_discount(
        &self,
        ctx: &AdminContext,
        base: &BaseDiscount,
        configuration: &DiscountConfiguration,
    ) -> Result<CreationOutcome, AdminShopifyError> {
        use discount_automatic_app_create::{DiscountAutomaticAppInput, Variables};

        let variables = Variables {
            automatic_app_discount: DiscountAutomaticAppInput {
                title: base.title.clone(),
                function_id: base.function_id.to_string(),
                starts_at: base.starts_at.to_rfc3339(),
                ends_at: base.ends_at.map(|t| t.to_rfc3339()),
                combines_with: base.combines_with.into(),
                discount_classes: base.discount_classes.clone(),
                metafields: vec![self.configuration_metafield(configuration)?],
            },
        };

        let response = self
            .execute::<DiscountAutomaticAppCreate>(ctx, variables)
            .await?;

        let payload = response.discount_automatic_app_create.ok_or_else(|| {
            AdminShopifyError::GraphQL(vec![GraphQLError::message(
                "No response from discountAutomaticAppCreate",
            )])
        })?;

        payload_outcome(payload.automatic_app_discount, payload.user_errors)
    }
}
