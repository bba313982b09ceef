//! fwrelayd - Firmware Lookup Relay Daemon
//!
//! Serves the SN/MTM → flash package → OTA lookup chain over HTTP.
//!
//! Usage:
//!   fwrelayd [OPTIONS] [config.toml]
//!
//! Options:
//!   --port <port>  Override `[server] port`
//!   --log-json     Emit logs as JSON lines
//!
//! Without a config file the daemon talks to the production vendor
//! endpoints and listens on 0.0.0.0:18090.

mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use fwrelay_api::{create_router, AppState};
use fwrelay_client::VendorClient;
use fwrelay_core::LookupChain;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DaemonConfig;

const DEFAULT_LOG_FILTER: &str =
    "fwrelayd=info,fwrelay_api=info,fwrelay_client=debug,fwrelay_core=info";

/// Parsed command-line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Listen port overriding the config file
    port: Option<u16>,
    log_json: bool,
}

fn parse_args(args: &[String]) -> Args {
    let mut result = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                match args.get(i + 1).map(|p| p.parse::<u16>()) {
                    Some(Ok(port)) => result.port = Some(port),
                    Some(Err(_)) => eprintln!("Invalid port: {}", args[i + 1]),
                    None => eprintln!("Missing argument for --port"),
                }
                i += 2;
            }
            "--log-json" => {
                result.log_json = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"fwrelayd - Firmware Lookup Relay Daemon

Usage: fwrelayd [OPTIONS] [config.toml]

Options:
  -p, --port <port>  Listen port (overrides [server] port)
      --log-json     Emit logs as JSON lines
  -h, --help         Print this help message

Examples:
  # Run against the production vendor endpoints on port 18090
  fwrelayd

  # Run with config file
  fwrelayd fwrelay.toml

  # Query it
  curl -X POST localhost:18090/ -d '{{"sn":"HA29117A"}}'
"#
    );
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&argv);

    // Initialize logging
    init_tracing(args.log_json);

    tracing::info!("Starting fwrelayd (Firmware Lookup Relay Daemon)");

    let mut config = match args.config_path.as_deref() {
        Some(path) => {
            tracing::info!("Loading config from: {}", path);
            DaemonConfig::load(Path::new(path))?
        }
        None => {
            tracing::info!("No config file provided, using built-in defaults");
            DaemonConfig::default()
        }
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!(
        info_url = %config.vendor.info_url,
        flash_url = %config.vendor.flash_url,
        ota_url = %config.vendor.ota_url,
        timeout_secs = ?config.vendor.request_timeout_secs,
        "Vendor endpoints"
    );

    let vendor = VendorClient::with_config(config.vendor.clone())
        .context("Failed to create vendor client")?;
    let chain = LookupChain::new(Arc::new(vendor));
    let app = create_router(AppState::new(Arc::new(chain)));

    // Bind to address
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    // Run the server
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("fwrelayd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
