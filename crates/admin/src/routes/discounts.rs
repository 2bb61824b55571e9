//! Discount creation route handlers.

use axum::{
    Form, Json,
    extract::{Path, State, rejection::FormRejection},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use discount_provisioner_core::{
    CollectionId, CreationOutcome, DiscountClass, DiscountCombinesWith, DiscountMethod, FunctionId,
    UserError,
};

use crate::{provisioning::AdminContext, state::AppState};

/// Form body for discount creation.
#[derive(Debug, Deserialize)]
pub struct DiscountForm {
    /// Serialized discount definition.
    pub discount: Option<String>,
}

/// Data for rendering an empty discount form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDiscountForm {
    /// Collections already selected (none for a new discount).
    pub collections: Vec<CollectionId>,
    /// Defaults for every form field.
    pub initial_data: InitialDiscountData,
}

/// Default values for a new discount.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialDiscountData {
    pub title: String,
    pub method: DiscountMethod,
    pub code: String,
    pub discount_classes: Vec<DiscountClass>,
    pub combines_with: DiscountCombinesWith,
    pub usage_limit: Option<i64>,
    pub applies_once_per_customer: bool,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub configuration: InitialConfiguration,
}

/// Default configuration, as the form's string fields.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialConfiguration {
    pub cart_line_percentage: String,
    pub order_percentage: String,
    pub delivery_percentage: String,
    pub collection_ids: Vec<CollectionId>,
    pub minimum_quantity: String,
    pub quantity_to_discount: String,
}

impl InitialDiscountData {
    /// A single-code discount starting at `now` with everything zeroed.
    #[must_use]
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            method: DiscountMethod::Code,
            code: String::new(),
            discount_classes: vec![],
            combines_with: DiscountCombinesWith::default(),
            usage_limit: None,
            applies_once_per_customer: false,
            starts_at: now,
            ends_at: None,
            configuration: InitialConfiguration {
                cart_line_percentage: "0".to_string(),
                order_percentage: "0".to_string(),
                delivery_percentage: "0".to_string(),
                collection_ids: vec![],
                minimum_quantity: "0".to_string(),
                quantity_to_discount: "0".to_string(),
            },
        }
    }
}

/// Defaults for a new discount form.
#[instrument(skip_all, fields(function_id = %function_id))]
pub async fn new_form(Path(function_id): Path<FunctionId>) -> Json<NewDiscountForm> {
    Json(NewDiscountForm {
        collections: vec![],
        initial_data: InitialDiscountData::starting_at(Utc::now()),
    })
}

/// Create discount(s) from the submitted form.
///
/// Always responds 200; failures are reported in the outcome body.
#[instrument(skip_all, fields(function_id = %function_id, request_id = %ctx.request_id()))]
pub async fn create(
    State(state): State<AppState>,
    Path(function_id): Path<FunctionId>,
    ctx: AdminContext,
    form: Result<Form<DiscountForm>, FormRejection>,
) -> Json<CreationOutcome> {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            warn!(error = %rejection, "Unreadable discount form");
            return Json(CreationOutcome::single_error(UserError::new(
                rejection.body_text(),
            )));
        }
    };

    let report = state
        .provisioner()
        .provision(&ctx, &function_id, form.discount.as_deref())
        .await;

    Json(report.into_outcome())
}
