//! fwrelay CLI - Command-line firmware lookup
//!
//! Runs the same SN/MTM → flash package → OTA chain as the relay daemon,
//! directly against the vendor endpoints.

mod commands;
mod config;
mod output;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fwrelay_chat::ChatFrontend;
use fwrelay_client::{VendorClient, VendorConfig};
use fwrelay_core::{DeviceLookup, LookupChain, LookupQuery};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::Config;
use crate::output::{OutputContext, OutputFormat};

#[derive(Parser)]
#[command(name = "fwrelay-cli")]
#[command(author, version, about = "Lenovo tablet firmware lookup CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "FWRELAY_CONFIG")]
    config: Option<PathBuf>,

    /// Base URL serving all three vendor endpoints (e.g. a local stub)
    #[arg(long, env = "FWRELAY_VENDOR_BASE")]
    vendor_base: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "FWRELAY_TIMEOUT")]
    timeout: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Minimal output (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up the full flash package (and optionally an OTA update)
    Query {
        /// Device serial number
        #[arg(long, required_unless_present = "mtm")]
        sn: Option<String>,

        /// Model code, used when the serial number does not resolve one
        #[arg(long)]
        mtm: Option<String>,

        /// Currently installed firmware version; enables the OTA lookup
        #[arg(long)]
        firmware: Option<String>,
    },

    /// Answer a chat message (e.g. "/query HA29117A") as the bot would
    Chat {
        /// Message text
        text: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    // Merge CLI args with config
    let merged = config.merge_with_args(
        cli.vendor_base.as_deref(),
        cli.timeout,
        cli.output,
        cli.no_color,
    )?;

    // Create output context
    let ctx = OutputContext::new(merged.output, merged.no_color, cli.quiet);
    let lookup = create_lookup(merged.vendor)?;

    // Execute command
    let outcome = match cli.command {
        Commands::Query { sn, mtm, firmware } => {
            let query = LookupQuery {
                sn,
                mtm,
                current_firmware_version: firmware,
            };
            commands::query(lookup, query, &ctx).await
        }

        Commands::Chat { text } => {
            let frontend = ChatFrontend::new(lookup);
            commands::chat(&frontend, &text, &ctx).await
        }
    };

    if let Err(e) = outcome {
        ctx.error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}

/// Build the lookup chain over the vendor client
fn create_lookup(vendor: VendorConfig) -> Result<Arc<dyn DeviceLookup>> {
    let client = VendorClient::with_config(vendor).context("Failed to create vendor client")?;
    Ok(Arc::new(LookupChain::new(Arc::new(client))))
}
