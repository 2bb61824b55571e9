//! Discount Provisioner CLI - create discounts and preview bulk codes.
//!
//! # Usage
//!
//! ```bash
//! # Create discount(s) from a payload file
//! dp-cli create --file discount.json --function-id 0199ab12-...
//!
//! # Preview a batch of bulk codes (no Shopify calls)
//! dp-cli codes --prefix SAVE --quantity 10
//! ```
//!
//! # Commands
//!
//! - `create` - Provision a discount payload against Shopify
//! - `codes` - Preview generated bulk codes

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::MakeWriter, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "dp-cli")]
#[command(author, version, about = "Discount provisioner CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create discount(s) from a JSON payload file
    Create {
        /// Path to the discount payload (JSON)
        #[arg(short, long)]
        file: PathBuf,

        /// Discount function ID to attach
        #[arg(long)]
        function_id: String,
    },
    /// Preview generated bulk discount codes
    Codes {
        /// Code prefix
        #[arg(short, long)]
        prefix: String,

        /// Number of codes
        #[arg(short, long, default_value_t = 10)]
        quantity: usize,
    },
}

#[tokio::main]
async fn main() {
    // stdout carries the command output
    log_subscriber(EnvFilter::from_default_env(), std::io::stderr).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn log_subscriber<W>(filter: EnvFilter, writer: W) -> impl tracing::Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .finish()
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Create { file, function_id } => {
            commands::create::create(&file, &function_id).await?;
        }
        Commands::Codes { prefix, quantity } => {
            commands::codes::preview(&prefix, quantity)?;
        }
    }
    Ok(())
}
