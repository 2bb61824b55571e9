//! Discount function configuration.
//!
//! The configuration is stored on the created discount as a JSON metafield
//! and read by the discount function at checkout.

use serde::{Deserialize, Serialize};

use super::id::CollectionId;

/// Errors that can occur when parsing a numeric configuration field.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NumericFieldError {
    /// The input is not a number.
    #[error("'{value}' is not a number")]
    NotANumber {
        /// The rejected input.
        value: String,
    },
    /// The input parsed, but to NaN or infinity.
    #[error("'{value}' is not a finite number")]
    NotFinite {
        /// The rejected input.
        value: String,
    },
}

/// Parse a loosely typed numeric field.
///
/// Leading and trailing whitespace is ignored. A missing or blank value is
/// unset (`Ok(None)`), which reaches the function configuration as `null`.
///
/// # Errors
///
/// Returns an error if the value is present but not a finite number.
///
/// # Examples
///
/// ```
/// use discount_provisioner_core::parse_numeric_field;
///
/// assert_eq!(parse_numeric_field(Some(" 12.5 ")), Ok(Some(12.5)));
/// assert_eq!(parse_numeric_field(Some("")), Ok(None));
/// assert_eq!(parse_numeric_field(None), Ok(None));
/// assert!(parse_numeric_field(Some("ten")).is_err());
/// ```
pub fn parse_numeric_field(raw: Option<&str>) -> Result<Option<f64>, NumericFieldError> {
    let Some(trimmed) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let value = trimmed
        .parse::<f64>()
        .map_err(|_| NumericFieldError::NotANumber {
            value: trimmed.to_string(),
        })?;

    if value.is_finite() {
        Ok(Some(value))
    } else {
        Err(NumericFieldError::NotFinite {
            value: trimmed.to_string(),
        })
    }
}

/// Normalized configuration attached to every created discount.
///
/// Shared unchanged by every code in a bulk batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountConfiguration {
    /// Percentage off qualifying cart lines.
    pub cart_line_percentage: Option<f64>,
    /// Percentage off the order subtotal.
    pub order_percentage: Option<f64>,
    /// Percentage off delivery.
    pub delivery_percentage: Option<f64>,
    /// Collections whose products qualify (empty means all products).
    #[serde(default)]
    pub collection_ids: Vec<CollectionId>,
    /// Only discount the cheapest qualifying line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_to_cheapest_line_only: Option<bool>,
    /// Minimum quantity before the discount applies.
    pub minimum_quantity: Option<f64>,
    /// Number of items discounted once the minimum is met.
    pub quantity_to_discount: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_field_valid() {
        assert_eq!(parse_numeric_field(Some("10")), Ok(Some(10.0)));
        assert_eq!(parse_numeric_field(Some("0")), Ok(Some(0.0)));
        assert_eq!(parse_numeric_field(Some("-5.25")), Ok(Some(-5.25)));
        assert_eq!(parse_numeric_field(Some("150")), Ok(Some(150.0)));
    }

    #[test]
    fn test_parse_numeric_field_unset() {
        assert_eq!(parse_numeric_field(None), Ok(None));
        assert_eq!(parse_numeric_field(Some("   ")), Ok(None));
    }

    #[test]
    fn test_parse_numeric_field_not_a_number() {
        assert_eq!(
            parse_numeric_field(Some("abc")),
            Err(NumericFieldError::NotANumber {
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn test_parse_numeric_field_rejects_non_finite() {
        assert!(matches!(
            parse_numeric_field(Some("NaN")),
            Err(NumericFieldError::NotFinite { .. })
        ));
        assert!(matches!(
            parse_numeric_field(Some("inf")),
            Err(NumericFieldError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_configuration_wire_format() {
        let config = DiscountConfiguration {
            cart_line_percentage: Some(10.0),
            order_percentage: None,
            delivery_percentage: Some(0.0),
            collection_ids: vec![CollectionId::new("gid://shopify/Collection/1")],
            apply_to_cheapest_line_only: None,
            minimum_quantity: Some(2.0),
            quantity_to_discount: Some(1.0),
        };

        let json = serde_json::to_value(&config).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "cartLinePercentage": 10.0,
                "orderPercentage": null,
                "deliveryPercentage": 0.0,
                "collectionIds": ["gid://shopify/Collection/1"],
                "minimumQuantity": 2.0,
                "quantityToDiscount": 1.0
            })
        );
    }
}
