//! VendorApi trait - the seam between the lookup chain and the vendor's HTTP endpoints

use async_trait::async_trait;

use crate::error::VendorResult;
use crate::models::{FlashPackage, MachineInfo, OtaResult};

/// Parameters of one OTA query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtaRequest {
    /// Sent as `deviceid`
    pub device_id: String,
    /// Sent as `devicemodel` with the region suffix appended
    pub product_model: String,
    /// Sent as `curfirmwarever`
    pub current_version: String,
}

/// The three vendor calls the lookup chain is built from.
///
/// Implementations normalize every well-formed but unexpected payload into the
/// empty sentinel (`None` or an empty list) and only return an error for
/// transport failures or bodies that cannot be decoded at all.
#[async_trait]
pub trait VendorApi: Send + Sync {
    /// Resolve device metadata for a serial number
    async fn fetch_machine_info(&self, sn: &str) -> VendorResult<Option<MachineInfo>>;

    /// List flash packages for a model code, in vendor order
    async fn fetch_flash_packages(&self, mtm: &str) -> VendorResult<Vec<FlashPackage>>;

    /// Ask for an incremental update from the given firmware version
    async fn fetch_ota(&self, request: &OtaRequest) -> VendorResult<Option<OtaResult>>;
}
