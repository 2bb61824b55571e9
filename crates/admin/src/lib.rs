//! Discount Provisioner library.
//!
//! Creates function-backed Shopify discounts in three modes: a single code,
//! a bulk batch of generated codes, or an automatic discount. The
//! provisioning core is exposed as a library so it can be driven by the
//! HTTP server, the CLI and the integration tests.
//!
//! # Security
//!
//! This crate handles HIGH PRIVILEGE Shopify Admin API tokens. Tokens are
//! held in `SecretString` and never logged.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod provisioning;
pub mod routes;
pub mod shopify;
pub mod state;
