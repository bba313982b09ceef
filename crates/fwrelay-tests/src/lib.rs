//! End-to-end tests for the firmware lookup relay
//!
//! Every test runs the real stack against a stub vendor on a local port:
//!
//! ```text
//! reqwest ──► relay router ──► LookupChain ──► VendorClient ──► StubVendor
//!            ChatFrontend ──┘
//! ```
//!
//! # Test Structure
//!
//! - `relay_e2e_test.rs` - HTTP relay over the stub vendor
//! - `chat_e2e_test.rs` - Chat front end over the stub vendor

use std::sync::Arc;

use fwrelay_api::{create_router, AppState};
use fwrelay_chat::ChatFrontend;
use fwrelay_client::testing::{StubVendor, TestServer};
use fwrelay_client::VendorClient;
use fwrelay_core::{DeviceLookup, LookupChain};

/// Stub vendor, lookup chain and relay server wired together
pub struct RelayFixture {
    pub stub: StubVendor,
    pub lookup: Arc<dyn DeviceLookup>,
    pub relay: TestServer,
    // Held so the vendor keeps serving for the fixture's lifetime
    _vendor: TestServer,
}

impl RelayFixture {
    /// Start the stub vendor and a relay in front of it
    pub async fn start(stub: StubVendor) -> Result<Self, Box<dyn std::error::Error>> {
        let vendor = stub.start().await?;
        let client = VendorClient::with_config(stub.config_for(&vendor))?;
        let lookup: Arc<dyn DeviceLookup> = Arc::new(LookupChain::new(Arc::new(client)));
        let relay = TestServer::start(create_router(AppState::new(lookup.clone())))
            .await?;

        Ok(Self {
            stub,
            lookup,
            relay,
            _vendor: vendor,
        })
    }

    /// Chat front end over the same lookup chain
    pub fn chat(&self) -> ChatFrontend {
        ChatFrontend::new(self.lookup.clone())
    }

    /// POST a JSON body to the relay root
    pub async fn post(&self, body: serde_json::Value) -> reqwest::Result<reqwest::Response> {
        reqwest::Client::new()
            .post(self.relay.url("/"))
            .json(&body)
            .send()
            .await
    }
}

/// Vendor with the tablet used throughout the tests: SN `HA29117A`,
/// model code `82XX`, product model `TB710FU`, one full package.
pub fn tablet_vendor() -> StubVendor {
    StubVendor::new()
        .machine(
            "HA29117A",
            serde_json::json!({
                "MTM": "82XX",
                "MachineName": "Legion Y700",
                "ProductModel": "TB710FU",
                "SaleArea": "PRC",
                "ProductDate": "2025-03-01"
            }),
        )
        .packages(
            "82XX",
            serde_json::json!([{
                "product_name": "Legion Y700",
                "latest_version": "TB710FU_CN_17.0.04.279",
                "platform": "QSM8650",
                "flashing_machine_method": "Rescue and Smart Assistant",
                "download_url": "https://dl.example/TB710FU_full.zip"
            }]),
        )
}
