//! Newtype IDs for type-safe Shopify references.
//!
//! Use the `define_gid!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different Shopify resources.

/// Macro to define a type-safe Shopify ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// Values are kept exactly as given: Shopify accepts both global IDs
/// (`gid://shopify/Collection/1`) and function handles, so no normalization
/// happens here.
///
/// # Example
///
/// ```rust
/// # use discount_provisioner_core::define_gid;
/// define_gid!(ProductGid);
/// define_gid!(VariantGid);
///
/// let product = ProductGid::new("gid://shopify/Product/1");
/// assert_eq!(product.as_str(), "gid://shopify/Product/1");
///
/// // These are different types, so this won't compile:
/// // let _: VariantGid = product;
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Shopify resources referenced by discount definitions
define_gid!(FunctionId);
define_gid!(CollectionId);
define_gid!(DiscountNodeId);
