//! Bulk code preview.
//!
//! # Usage
//!
//! ```bash
//! dp-cli codes --prefix SAVE --quantity 5
//! ```

use discount_provisioner_admin::provisioning::CodeBatch;
use thiserror::Error;

/// Errors that can occur while previewing codes.
#[derive(Debug, Error)]
pub enum CodesError {
    /// The prefix is empty.
    #[error("Prefix must not be empty")]
    EmptyPrefix,
}

/// Generate a batch the same way bulk creation does.
///
/// # Errors
///
/// Returns an error if `prefix` is empty.
pub fn generate(prefix: &str, quantity: usize) -> Result<Vec<String>, CodesError> {
    if prefix.is_empty() {
        return Err(CodesError::EmptyPrefix);
    }
    Ok(CodeBatch::new(prefix).take(quantity))
}

/// Print a batch of codes, one per line.
///
/// # Errors
///
/// Returns an error if `prefix` is empty.
#[allow(clippy::print_stdout)]
pub fn preview(prefix: &str, quantity: usize) -> Result<(), CodesError> {
    for code in generate(prefix, quantity)? {
        println!("{code}");
    }
    Ok(())
}
