//! HTTP middleware and extractors.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! The [`AdminContext`](crate::provisioning::AdminContext) extractor in
//! [`shopify_session`] runs per handler, after the stack above.

pub mod request_id;
pub mod shopify_session;

pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use shopify_session::SHOPIFY_ACCESS_TOKEN_HEADER;
