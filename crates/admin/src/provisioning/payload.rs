//! Incoming discount definition as submitted by the discount form.
//!
//! Fields are loosely typed on purpose: numeric inputs arrive as strings
//! (or numbers), timestamps in several shapes. Tightening happens in
//! [`normalize`](super::normalize) and [`DiscountPayload::base_discount`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use discount_provisioner_core::{
    BaseDiscount, CollectionId, DiscountClass, DiscountCombinesWith, DiscountMethod, FunctionId,
};

use super::ProvisionError;

/// A discount definition submitted for creation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountPayload {
    /// Internal discount title.
    #[serde(default)]
    pub title: String,
    /// Creation method (`CODE`, `BULK`, anything else is automatic).
    #[serde(default)]
    pub method: Option<String>,
    /// Code for `CODE` discounts.
    #[serde(default)]
    pub code: Option<String>,
    /// Combination rules.
    #[serde(default)]
    pub combines_with: DiscountCombinesWith,
    /// Classes the function applies to.
    #[serde(default)]
    pub discount_classes: Vec<DiscountClass>,
    /// Maximum total redemptions (code discounts only).
    #[serde(default)]
    pub usage_limit: Option<i64>,
    /// Limit each customer to one redemption (code discounts only).
    #[serde(default)]
    pub applies_once_per_customer: Option<bool>,
    /// Start of the validity window.
    #[serde(default)]
    pub starts_at: Option<Value>,
    /// End of the validity window.
    #[serde(default)]
    pub ends_at: Option<Value>,
    /// Function configuration, including bulk settings.
    pub configuration: RawConfiguration,
}

/// Configuration block exactly as submitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawConfiguration {
    #[serde(default, deserialize_with = "loose_string")]
    pub cart_line_percentage: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub order_percentage: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub delivery_percentage: Option<String>,
    #[serde(default)]
    pub collection_ids: Option<Vec<CollectionId>>,
    #[serde(default)]
    pub apply_to_cheapest_line_only: Option<bool>,
    #[serde(default, deserialize_with = "loose_string")]
    pub minimum_quantity: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub quantity_to_discount: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub bulk_prefix: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub bulk_quantity: Option<String>,
}

impl DiscountPayload {
    /// Parse a serialized payload.
    ///
    /// # Errors
    ///
    /// Returns `ProvisionError::MalformedPayload` if the input is not a JSON
    /// object with the expected fields.
    pub fn parse(raw: &str) -> Result<Self, ProvisionError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Creation method requested by the payload.
    #[must_use]
    pub fn method(&self) -> DiscountMethod {
        DiscountMethod::from_payload(self.method.as_deref())
    }

    /// Build the mode-independent definition shared by every creation call.
    ///
    /// # Errors
    ///
    /// Returns an error if `startsAt` is missing or either timestamp cannot
    /// be parsed. A missing, null or empty `endsAt` is open-ended.
    pub fn base_discount(&self, function_id: FunctionId) -> Result<BaseDiscount, ProvisionError> {
        let starts_at = self
            .starts_at
            .as_ref()
            .map(|v| parse_timestamp("startsAt", v))
            .transpose()?
            .flatten()
            .ok_or(ProvisionError::MissingStartsAt)?;

        let ends_at = self
            .ends_at
            .as_ref()
            .map(|v| parse_timestamp("endsAt", v))
            .transpose()?
            .flatten();

        Ok(BaseDiscount {
            function_id,
            title: self.title.clone(),
            combines_with: self.combines_with,
            discount_classes: self.discount_classes.clone(),
            starts_at,
            ends_at,
        })
    }
}

/// Parse a timestamp given as RFC 3339, `YYYY-MM-DD`, a naive
/// `YYYY-MM-DDTHH:MM[:SS]` (read as UTC) or epoch milliseconds.
///
/// Null and blank values are `Ok(None)`.
fn parse_timestamp(field: &'static str, value: &Value) -> Result<Option<DateTime<Utc>>, ProvisionError> {
    let invalid = || ProvisionError::InvalidTimestamp {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            parse_timestamp_str(s).map(Some).ok_or_else(invalid)
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
            .map(Some)
            .ok_or_else(invalid),
        _ => Err(invalid()),
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.and_utc())
}

/// Accept a string, a number, or null for a string-typed form field.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, found {other}"
        ))),
    }
}
