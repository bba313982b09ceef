//! Lookup input and its normalization

use serde::{Deserialize, Serialize};

/// Input to one lookup: a serial number and/or a model code, plus the
/// firmware version currently installed when an OTA update is wanted.
///
/// Deserializes from the relay's HTTP body
/// (`{"sn": ..., "mtm": ..., "currentFirmwareVersion": ...}`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupQuery {
    #[serde(default)]
    pub sn: Option<String>,
    #[serde(default)]
    pub mtm: Option<String>,
    #[serde(default)]
    pub current_firmware_version: Option<String>,
}

impl LookupQuery {
    /// Query by serial number
    pub fn by_sn(sn: impl Into<String>) -> Self {
        Self {
            sn: Some(sn.into()),
            ..Default::default()
        }
        .normalized()
    }

    /// Query by model code
    pub fn by_mtm(mtm: impl Into<String>) -> Self {
        Self {
            mtm: Some(mtm.into()),
            ..Default::default()
        }
        .normalized()
    }

    /// Attach the currently installed firmware version
    pub fn with_firmware_version(mut self, version: impl Into<String>) -> Self {
        self.current_firmware_version = Some(version.into());
        self.normalized()
    }

    /// Trim all fields, upper-case the keys, and drop empty values
    pub fn normalized(self) -> Self {
        Self {
            sn: normalize_key(self.sn),
            mtm: normalize_key(self.mtm),
            current_firmware_version: self
                .current_firmware_version
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        }
    }

    /// True when at least one lookup key is present
    pub fn has_key(&self) -> bool {
        is_present(&self.sn) || is_present(&self.mtm)
    }
}

fn normalize_key(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_uppercase())
        .filter(|v| !v.is_empty())
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}
