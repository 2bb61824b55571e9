//! Discount Provisioner Core - Shared types library.
//!
//! This crate provides the types shared by every discount provisioner component:
//! - `admin` - Provisioning service (Shopify Admin API, HTTP surface)
//! - `cli` - Command-line tools for provisioning and code previews
//!
//! # Architecture
//!
//! The core crate contains only types and pure parsing helpers - no I/O, no
//! HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Discount definitions, configuration, outcomes and type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
