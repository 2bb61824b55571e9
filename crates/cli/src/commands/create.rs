//! Discount creation from a payload file.
//!
//! # Usage
//!
//! ```bash
//! dp-cli create --file discount.json --function-id 0199ab12-...
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPIFY_STORE` - Shopify store domain
//! - `SHOPIFY_ADMIN_ACCESS_TOKEN` - Admin API access token (required here)
//! - Every other variable read by the provisioner service

use std::path::Path;

use discount_provisioner_admin::{
    config::{ConfigError, ProvisionerConfig},
    provisioning::{AdminContext, DiscountProvisioner, ProvisionOptions, ProvisionReport},
    shopify::{AdminClient, AdminShopifyError},
};
use discount_provisioner_core::FunctionId;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during discount creation.
#[derive(Debug, Error)]
pub enum CreateError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No access token is configured.
    #[error("Missing environment variable: SHOPIFY_ADMIN_ACCESS_TOKEN")]
    MissingAccessToken,

    /// The payload file could not be read.
    #[error("Failed to read payload file: {0}")]
    Io(#[from] std::io::Error),

    /// The Shopify client could not be built.
    #[error("Shopify client error: {0}")]
    Shopify(#[from] AdminShopifyError),

    /// The outcome could not be printed.
    #[error("Failed to encode outcome: {0}")]
    Json(#[from] serde_json::Error),
}

/// Provision the payload in `file` and print the outcome.
///
/// Prints the outcome JSON followed by one line per item. Provisioning
/// failures are reported in the outcome, not as an error.
///
/// # Errors
///
/// Returns an error if configuration is missing or the file cannot be read.
pub async fn create(file: &Path, function_id: &str) -> Result<(), CreateError> {
    let config = ProvisionerConfig::from_env()?;
    let access_token = config
        .shopify
        .access_token
        .clone()
        .ok_or(CreateError::MissingAccessToken)?;

    let payload = std::fs::read_to_string(file)?;

    let client = AdminClient::new(&config.shopify, &config.discounts)?;
    let provisioner = DiscountProvisioner::new(client, ProvisionOptions::from(&config.discounts));
    let ctx = AdminContext::new(
        config.shopify.store.clone(),
        access_token,
        Uuid::new_v4().to_string(),
    );

    tracing::info!(file = %file.display(), function_id, "Provisioning discount");

    let report = provisioner
        .provision(&ctx, &FunctionId::new(function_id), Some(&payload))
        .await;

    print_report(report)
}

#[allow(clippy::print_stdout)]
fn print_report(report: ProvisionReport) -> Result<(), CreateError> {
    for line in summary_lines(&report) {
        println!("{line}");
    }
    println!("{}", serde_json::to_string_pretty(&report.into_outcome())?);
    Ok(())
}

fn summary_lines(report: &ProvisionReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .items()
        .iter()
        .map(|item| {
            let code = item.code.as_deref().unwrap_or("(automatic)");
            let status = if item.outcome.is_success() {
                "created".to_string()
            } else {
                item.outcome
                    .errors()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ")
            };
            format!("{code}: {status}")
        })
        .collect();

    if report.is_rejected() {
        lines.push("rejected before creation".to_string());
    } else {
        lines.push(format!(
            "{} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        ));
    }
    lines
}
