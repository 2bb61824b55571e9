//! Discount definition types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::FunctionId;

/// How a discount is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountMethod {
    /// A single code that customers enter at checkout.
    Code,
    /// Many generated codes sharing one definition.
    Bulk,
    /// No code; applied automatically by rule.
    Automatic,
}

impl DiscountMethod {
    /// Resolve the method field of an incoming payload.
    ///
    /// Anything other than `CODE` or `BULK` (including a missing value)
    /// creates an automatic discount.
    #[must_use]
    pub fn from_payload(value: Option<&str>) -> Self {
        match value {
            Some("CODE") => Self::Code,
            Some("BULK") => Self::Bulk,
            _ => Self::Automatic,
        }
    }

    /// Wire value used in payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Code => "CODE",
            Self::Bulk => "BULK",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl std::fmt::Display for DiscountMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Code => write!(f, "Code"),
            Self::Bulk => write!(f, "Bulk"),
            Self::Automatic => write!(f, "Automatic"),
        }
    }
}

/// Classification tag telling Shopify which discount class a function targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiscountClass {
    /// Discounts on cart lines.
    Product,
    /// Discounts on the order subtotal.
    Order,
    /// Discounts on delivery.
    Shipping,
}

/// Which other discount classes this discount may combine with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountCombinesWith {
    /// Can combine with order discounts.
    #[serde(default)]
    pub order_discounts: bool,
    /// Can combine with product discounts.
    #[serde(default)]
    pub product_discounts: bool,
    /// Can combine with shipping discounts.
    #[serde(default)]
    pub shipping_discounts: bool,
}

/// Mode-independent fields shared by every creation call in a request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDiscount {
    /// Discount function the created discount runs.
    pub function_id: FunctionId,
    /// Internal discount title.
    pub title: String,
    /// Combination rules.
    pub combines_with: DiscountCombinesWith,
    /// Classes the function applies to.
    pub discount_classes: Vec<DiscountClass>,
    /// When the discount becomes active.
    pub starts_at: DateTime<Utc>,
    /// When the discount expires; `None` is open-ended.
    pub ends_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_payload() {
        assert_eq!(DiscountMethod::from_payload(Some("CODE")), DiscountMethod::Code);
        assert_eq!(DiscountMethod::from_payload(Some("BULK")), DiscountMethod::Bulk);
        assert_eq!(
            DiscountMethod::from_payload(Some("AUTOMATIC")),
            DiscountMethod::Automatic
        );
    }

    #[test]
    fn test_method_unknown_falls_back_to_automatic() {
        assert_eq!(DiscountMethod::from_payload(None), DiscountMethod::Automatic);
        assert_eq!(
            DiscountMethod::from_payload(Some("code")),
            DiscountMethod::Automatic
        );
    }

    #[test]
    fn test_method_display() {
        assert_eq!(DiscountMethod::Bulk.to_string(), "Bulk");
        assert_eq!(DiscountMethod::Code.as_str(), "CODE");
    }

    #[test]
    fn test_combines_with_camel_case() {
        let json = r#"{"orderDiscounts":true,"productDiscounts":false,"shippingDiscounts":true}"#;
        let combines: DiscountCombinesWith = serde_json::from_str(json).expect("deserialize");
        assert!(combines.order_discounts);
        assert!(!combines.product_discounts);
        assert!(combines.shipping_discounts);
    }

    #[test]
    fn test_combines_with_missing_flags_default_false() {
        let combines: DiscountCombinesWith = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(combines, DiscountCombinesWith::default());
    }

    #[test]
    fn test_discount_class_wire_format() {
        let classes: Vec<DiscountClass> =
            serde_json::from_str(r#"["PRODUCT","ORDER","SHIPPING"]"#).expect("deserialize");
        assert_eq!(
            classes,
            vec![
                DiscountClass::Product,
                DiscountClass::Order,
                DiscountClass::Shipping
            ]
        );
    }
}
