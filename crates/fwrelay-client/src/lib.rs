//! fwrelay Vendor Client
//!
//! Typed HTTP client for the three vendor endpoints the relay chains
//! together: device info by serial number, full flash packages by model
//! code, and incremental OTA updates.
//!
//! # Example
//!
//! ```rust,no_run
//! use fwrelay_client::{VendorClient, VendorConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = VendorClient::with_config(VendorConfig::default())?;
//!
//!     if let Some(info) = client.machine_info("HA29117A").await? {
//!         let packages = client.flash_packages(info.model_code().unwrap_or_default()).await?;
//!         println!("{} package(s)", packages.len());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Testing
//!
//! The `testing` module provides a stub vendor server and a test server
//! wrapper for integration tests:
//!
//! ```rust,ignore
//! use fwrelay_client::testing::StubVendor;
//!
//! let stub = StubVendor::new().machine("HA29117A", json!({"MTM": "82XX"}));
//! let server = stub.start().await?;
//! let client = VendorClient::with_config(stub.config_for(&server))?;
//! ```

mod client;
mod config;
pub mod ota;
pub mod testing;

pub use client::VendorClient;
pub use config::VendorConfig;
pub use ota::{extract_ota_update, extract_result_message};

// Re-export core types for convenience
pub use fwrelay_core::{
    FlashPackage, MachineInfo, OtaRequest, OtaResult, VendorApi, VendorError, VendorResult,
    VendorService,
};
