//! The value handed from the lookup chain to its front ends

use serde::{Deserialize, Serialize};

use super::{FlashPackage, MachineInfo, OtaResult};
use crate::error::{ErrorKind, LookupError};

/// Outcome of one lookup.
///
/// A successful result always carries `full_package`; a failed one carries
/// `error` and `error_kind`, plus `mtm` when the failure happened after a
/// model code was resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub success: bool,
    /// Resolved model code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtm: Option<String>,
    /// Present only when the model code was resolved through the serial number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_info: Option<MachineInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_package: Option<FlashPackage>,
    /// Present only when a firmware version was given and an update exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ota_package: Option<OtaResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl LookupResult {
    /// Build a successful result
    pub fn found(
        machine_info: Option<MachineInfo>,
        full_package: FlashPackage,
        ota_package: Option<OtaResult>,
    ) -> Self {
        Self {
            success: true,
            mtm: full_package.mtm.clone(),
            machine_info,
            full_package: Some(full_package),
            ota_package,
            error: None,
            error_kind: None,
        }
    }

    /// Build a failed result from the error that aborted the chain
    pub fn failed(err: &LookupError) -> Self {
        Self {
            success: false,
            mtm: err.mtm().map(str::to_string),
            machine_info: None,
            full_package: None,
            ota_package: None,
            error: Some(err.to_string()),
            error_kind: Some(err.kind()),
        }
    }

    /// Model code the lookup resolved, if it got that far
    pub fn mtm(&self) -> Option<&str> {
        self.mtm
            .as_deref()
            .or_else(|| self.full_package.as_ref().and_then(|p| p.mtm.as_deref()))
    }
}

impl From<LookupError> for LookupResult {
    fn from(err: LookupError) -> Self {
        Self::failed(&err)
    }
}
