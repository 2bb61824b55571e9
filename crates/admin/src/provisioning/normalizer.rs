//! Raw configuration to function configuration.

use discount_provisioner_core::{DiscountConfiguration, parse_numeric_field};

use super::{FieldError, ProvisionError, RawConfiguration};

/// Convert the submitted configuration into the configuration stored on the
/// discount.
///
/// Every numeric field is parsed; blank or missing fields stay unset. All
/// invalid fields are reported together so the caller can fix them in one go.
///
/// # Errors
///
/// Returns `ProvisionError::InvalidConfiguration` listing each field that is
/// present but not a finite number.
pub fn normalize(raw: &RawConfiguration) -> Result<DiscountConfiguration, ProvisionError> {
    let mut errors = Vec::new();
    let mut field = |name: &'static str, value: Option<&str>| {
        parse_numeric_field(value).unwrap_or_else(|source| {
            errors.push(FieldError {
                field: name,
                source,
            });
            None
        })
    };

    let cart_line_percentage = field("cartLinePercentage", raw.cart_line_percentage.as_deref());
    let order_percentage = field("orderPercentage", raw.order_percentage.as_deref());
    let delivery_percentage = field("deliveryPercentage", raw.delivery_percentage.as_deref());
    let minimum_quantity = field("minimumQuantity", raw.minimum_quantity.as_deref());
    let quantity_to_discount = field("quantityToDiscount", raw.quantity_to_discount.as_deref());

    if !errors.is_empty() {
        return Err(ProvisionError::InvalidConfiguration(errors));
    }

    Ok(DiscountConfiguration {
        cart_line_percentage,
        order_percentage,
        delivery_percentage,
        collection_ids: raw.collection_ids.clone().unwrap_or_default(),
        apply_to_cheapest_line_only: raw.apply_to_cheapest_line_only,
        minimum_quantity,
        quantity_to_discount,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use discount_provisioner_core::{CollectionId, NumericFieldError};

    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawConfiguration {
        let object: serde_json::Map<String, serde_json::Value> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), serde_json::Value::from(*v)))
            .collect();
        serde_json::from_value(serde_json::Value::Object(object)).unwrap()
    }

    #[test]
    fn test_parses_numeric_strings() {
        let config = normalize(&raw(&[
            ("cartLinePercentage", "10"),
            ("orderPercentage", " 5.5 "),
            ("deliveryPercentage", "0"),
            ("minimumQuantity", "2"),
            ("quantityToDiscount", "1"),
        ]))
        .unwrap();

        assert_eq!(config.cart_line_percentage, Some(10.0));
        assert_eq!(config.order_percentage, Some(5.5));
        assert_eq!(config.delivery_percentage, Some(0.0));
        assert_eq!(config.minimum_quantity, Some(2.0));
        assert_eq!(config.quantity_to_discount, Some(1.0));
    }

    #[test]
    fn test_no_range_validation() {
        let config = normalize(&raw(&[("orderPercentage", "150")])).unwrap();
        assert_eq!(config.order_percentage, Some(150.0));
    }

    #[test]
    fn test_blank_and_missing_fields_are_unset() {
        let config = normalize(&raw(&[("orderPercentage", "  ")])).unwrap();
        assert_eq!(config.order_percentage, None);
        assert_eq!(config.cart_line_percentage, None);

        let json = serde_json::to_value(&config).unwrap();
        assert!(json["orderPercentage"].is_null());
    }

    #[test]
    fn test_collection_ids_default_to_empty() {
        let config = normalize(&RawConfiguration::default()).unwrap();
        assert!(config.collection_ids.is_empty());

        let with_ids = RawConfiguration {
            collection_ids: Some(vec![CollectionId::new("gid://shopify/Collection/7")]),
            apply_to_cheapest_line_only: Some(true),
            ..RawConfiguration::default()
        };
        let config = normalize(&with_ids).unwrap();
        assert_eq!(config.collection_ids.len(), 1);
        assert_eq!(config.apply_to_cheapest_line_only, Some(true));
    }

    #[test]
    fn test_reports_every_invalid_field() {
        let err = normalize(&raw(&[
            ("cartLinePercentage", "ten"),
            ("orderPercentage", "5"),
            ("quantityToDiscount", "NaN"),
        ]))
        .unwrap_err();

        let ProvisionError::InvalidConfiguration(fields) = err else {
            panic!("expected configuration error");
        };
        assert_eq!(
            fields,
            vec![
                FieldError {
                    field: "cartLinePercentage",
                    source: NumericFieldError::NotANumber {
                        value: "ten".to_string()
                    },
                },
                FieldError {
                    field: "quantityToDiscount",
                    source: NumericFieldError::NotFinite {
                        value: "NaN".to_string()
                    },
                },
            ]
        );
    }

    #[test]
    fn test_bulk_fields_are_not_part_of_configuration() {
        let config = normalize(&raw(&[("bulkPrefix", "SAVE"), ("bulkQuantity", "abc")])).unwrap();
        let json = serde_json::to_value(&config).unwrap();
        assert!(json.get("bulkPrefix").is_none());
        assert!(json.get("bulkQuantity").is_none());
    }
}
