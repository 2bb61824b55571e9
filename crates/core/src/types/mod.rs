//! Core types for the discount provisioner.
//!
//! This module provides type-safe wrappers for discount domain concepts.

pub mod configuration;
pub mod discount;
pub mod id;
pub mod outcome;

pub use configuration::{DiscountConfiguration, NumericFieldError, parse_numeric_field};
pub use discount::{BaseDiscount, DiscountClass, DiscountCombinesWith, DiscountMethod};
pub use id::*;
pub use outcome::{CreationOutcome, UserError};
