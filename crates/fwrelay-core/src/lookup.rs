//! The device lookup chain: SN -> machine info -> flash package -> OTA

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::LookupError;
use crate::models::{non_empty, FlashPackage, LookupResult, MachineInfo, OtaResult};
use crate::query::LookupQuery;
use crate::vendor::{OtaRequest, VendorApi};

/// Single entry point shared by every front end
#[async_trait]
pub trait DeviceLookup: Send + Sync {
    /// Run one lookup. Never fails: errors are folded into the result.
    async fn resolve(&self, query: &LookupQuery) -> LookupResult;
}

/// Everything a successful lookup gathered
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub machine_info: Option<MachineInfo>,
    pub package: FlashPackage,
    pub ota: Option<OtaResult>,
}

impl From<Resolution> for LookupResult {
    fn from(r: Resolution) -> Self {
        LookupResult::found(r.machine_info, r.package, r.ota)
    }
}

/// Sequential lookup chain over a [`VendorApi`]
#[derive(Clone)]
pub struct LookupChain {
    vendor: Arc<dyn VendorApi>,
}

impl LookupChain {
    pub fn new(vendor: Arc<dyn VendorApi>) -> Self {
        Self { vendor }
    }

    /// Run the chain, stopping at the first error.
    ///
    /// The serial number is authoritative: an explicit model code is only
    /// used when the serial number did not resolve to one.
    pub async fn run(&self, query: &LookupQuery) -> Result<Resolution, LookupError> {
        let sn = non_empty(query.sn.as_deref());
        let explicit_mtm = non_empty(query.mtm.as_deref());

        if sn.is_none() && explicit_mtm.is_none() {
            return Err(LookupError::MissingInput);
        }

        let mut machine_info = None;
        let mut resolved_mtm = None;

        if let Some(sn) = sn {
            match self.vendor.fetch_machine_info(sn).await? {
                Some(info) => {
                    if let Some(mtm) = info.model_code().map(str::to_string) {
                        info!(sn, mtm = %mtm, "Resolved MTM from serial number");
                        resolved_mtm = Some(mtm);
                        machine_info = Some(info);
                    } else {
                        debug!(sn, "Device info has no MTM");
                    }
                }
                None => debug!(sn, "No device info for serial number"),
            }
        }

        let mtm = resolved_mtm
            .or_else(|| explicit_mtm.map(str::to_string))
            .ok_or(LookupError::NoMtm)?;

        let mut package = self
            .vendor
            .fetch_flash_packages(&mtm)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NoPackage(mtm.clone()))?;
        info!(
            mtm = %mtm,
            version = package.latest_version.as_deref().unwrap_or("-"),
            "Found full flash package"
        );
        package.mtm = Some(mtm);

        let mut ota = None;
        if let Some(current_version) = non_empty(query.current_firmware_version.as_deref()) {
            let product_model = machine_info
                .as_ref()
                .and_then(MachineInfo::product_model)
                .or_else(|| package.product_model())
                .map(str::to_string);

            match product_model {
                Some(product_model) => {
                    // SN only identifies the device when it resolved the machine info
                    let device_id = match (sn, &machine_info) {
                        (Some(sn), Some(_)) => sn.to_string(),
                        _ => product_model.clone(),
                    };
                    let request = OtaRequest {
                        device_id,
                        product_model,
                        current_version: current_version.to_string(),
                    };
                    ota = self.vendor.fetch_ota(&request).await?;
                    match &ota {
                        Some(update) => info!(version = %update.version, "OTA update found"),
                        None => info!(current_version, "No OTA update available"),
                    }
                }
                None => warn!(current_version, "Skipping OTA lookup: no product model known"),
            }
        }

        Ok(Resolution {
            machine_info,
            package,
            ota,
        })
    }
}

#[async_trait]
impl DeviceLookup for LookupChain {
    async fn resolve(&self, query: &LookupQuery) -> LookupResult {
        match self.run(query).await {
            Ok(resolution) => resolution.into(),
            Err(err) => {
                warn!(error = %err, ?query, "Lookup failed");
                LookupResult::failed(&err)
            }
        }
    }
}
