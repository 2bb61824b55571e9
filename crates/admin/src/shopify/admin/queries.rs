//! GraphQL mutation definitions for the Shopify Admin API.
//!
//! Each operation implements `graphql_client::GraphQLQuery` with its
//! variables and response types declared next to the query text.

use graphql_client::{GraphQLQuery, QueryBody};

// =============================================================================
// Shared input and payload types
// =============================================================================

pub mod common {
    use serde::{Deserialize, Serialize};

    use discount_provisioner_core::{DiscountClass, DiscountCombinesWith};

    /// `DiscountCombinesWithInput`.
    #[derive(Debug, Clone, Copy, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCombinesWithInput {
        pub order_discounts: bool,
        pub product_discounts: bool,
        pub shipping_discounts: bool,
    }

    impl From<DiscountCombinesWith> for DiscountCombinesWithInput {
        fn from(c: DiscountCombinesWith) -> Self {
            Self {
                order_discounts: c.order_discounts,
                product_discounts: c.product_discounts,
                shipping_discounts: c.shipping_discounts,
            }
        }
    }

    /// `MetafieldInput`.
    #[derive(Debug, Clone, Serialize)]
    pub struct MetafieldInput {
        pub namespace: String,
        pub key: String,
        #[serde(rename = "type")]
        pub type_: String,
        pub value: String,
    }

    /// Re-export so inputs read like the schema.
    pub type DiscountClassInput = DiscountClass;

    /// `DiscountUserError`.
    #[derive(Debug, Clone, Deserialize)]
    pub struct DiscountUserError {
        pub code: Option<String>,
        pub message: String,
        pub field: Option<Vec<String>>,
    }

    /// Created discount reference.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreatedAppDiscount {
        pub discount_id: String,
    }
}

// =============================================================================
// Discount mutations
// =============================================================================

/// `discountCodeAppCreate`: a code discount backed by a function.
pub struct DiscountCodeAppCreate;

pub mod discount_code_app_create {
    use serde::{Deserialize, Serialize};

    pub use super::common::{
        CreatedAppDiscount, DiscountClassInput, DiscountCombinesWithInput, DiscountUserError,
        MetafieldInput,
    };

    pub const OPERATION_NAME: &str = "DiscountCodeAppCreate";
    pub const QUERY: &str = r"mutation DiscountCodeAppCreate($codeAppDiscount: DiscountCodeAppInput!) {
  discountCodeAppCreate(codeAppDiscount: $codeAppDiscount) {
    codeAppDiscount {
      discountId
    }
    userErrors {
      code
      message
      field
    }
  }
}";

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub code_app_discount: DiscountCodeAppInput,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountCodeAppInput {
        pub title: String,
        pub function_id: String,
        pub code: String,
        pub starts_at: String,
        pub ends_at: Option<String>,
        pub usage_limit: Option<i64>,
        pub applies_once_per_customer: bool,
        pub combines_with: DiscountCombinesWithInput,
        pub discount_classes: Vec<DiscountClassInput>,
        pub metafields: Vec<MetafieldInput>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub discount_code_app_create: Option<Payload>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub code_app_discount: Option<CreatedAppDiscount>,
        #[serde(default)]
        pub user_errors: Vec<DiscountUserError>,
    }
}

impl GraphQLQuery for DiscountCodeAppCreate {
    type Variables = discount_code_app_create::Variables;
    type ResponseData = discount_code_app_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: discount_code_app_create::QUERY,
            operation_name: discount_code_app_create::OPERATION_NAME,
        }
    }
}

/// `discountAutomaticAppCreate`: an automatic discount backed by a function.
pub struct DiscountAutomaticAppCreate;

pub mod discount_automatic_app_create {
    use serde::{Deserialize, Serialize};

    pub use super::common::{
        CreatedAppDiscount, DiscountClassInput, DiscountCombinesWithInput, DiscountUserError,
        MetafieldInput,
    };

    pub const OPERATION_NAME: &str = "DiscountAutomaticAppCreate";
    pub const QUERY: &str = r"mutation DiscountAutomaticAppCreate($automaticAppDiscount: DiscountAutomaticAppInput!) {
  discountAutomaticAppCreate(automaticAppDiscount: $automaticAppDiscount) {
    automaticAppDiscount {
      discountId
    }
    userErrors {
      code
      message
      field
    }
  }
}";

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub automatic_app_discount: DiscountAutomaticAppInput,
    }

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct DiscountAutomaticAppInput {
        pub title: String,
        pub function_id: String,
        pub starts_at: String,
        pub ends_at: Option<String>,
        pub combines_with: DiscountCombinesWithInput,
        pub discount_classes: Vec<DiscountClassInput>,
        pub metafields: Vec<MetafieldInput>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub discount_automatic_app_create: Option<Payload>,
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Payload {
        pub automatic_app_discount: Option<CreatedAppDiscount>,
        #[serde(default)]
        pub user_errors: Vec<DiscountUserError>,
    }
}

impl GraphQLQuery for DiscountAutomaticAppCreate {
    type Variables = discount_automatic_app_create::Variables;
    type ResponseData = discount_automatic_app_create::ResponseData;

    fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
        QueryBody {
            variables,
            query: discount_automatic_app_create::QUERY,
            operation_name: discount_automatic_app_create::OPERATION_NAME,
        }
    }
}
