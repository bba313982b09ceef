//! Vendor endpoint configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_INFO_URL: &str =
    "https://ptstpd.lenovo.com.cn/home/ConfigurationQuery/getMachineSequenceInfo";
const DEFAULT_FLASH_URL: &str =
    "https://ptstpd.lenovo.com.cn/home/ConfigurationQuery/getPadFlashingMachine";
const DEFAULT_OTA_URL: &str = "https://ota.lenovo.com/engine/upgrade";

/// The OTA endpoint only answers clients that look like an Android device
const DEFAULT_OTA_USER_AGENT: &str =
    "Dalvik/2.1.0 (Linux; U; Android 15; TB710FU Build/AQ3A.250129.001)";

/// Endpoint URLs and the fixed values sent with every OTA query.
///
/// Every field has a default, so a `[vendor]` TOML table only needs the keys
/// it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Device-info endpoint, queried with `?MachineNo=<SN>`
    pub info_url: String,
    /// Flash-package endpoint, POSTed `{"mtm": ...}`
    pub flash_url: String,
    /// OTA endpoint, POSTed with the query string built from the fields below
    pub ota_url: String,
    pub ota_user_agent: String,
    pub locale: String,
    /// Sent as `nationcode` and appended to the device model (`TB710FU_CN`)
    pub nation_code: String,
    /// Placeholder; the vendor does not validate it
    pub pid: String,
    /// Placeholder RAM size; the vendor does not validate it
    pub ram: u32,
    pub checksum_type: String,
    /// Per-request timeout. Unset means requests may wait indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for VendorConfig {
    fn default() -> Self {
        Self {
            info_url: DEFAULT_INFO_URL.to_string(),
            flash_url: DEFAULT_FLASH_URL.to_string(),
            ota_url: DEFAULT_OTA_URL.to_string(),
            ota_user_agent: DEFAULT_OTA_USER_AGENT.to_string(),
            locale: "zh".to_string(),
            nation_code: "CN".to_string(),
            pid: String::new(),
            ram: 8,
            checksum_type: "sha256".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl VendorConfig {
    /// Point all three endpoints at one host, using the vendor's path layout.
    ///
    /// Used to aim the client at a local stub server.
    pub fn with_base_url(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            info_url: format!("{}/getMachineSequenceInfo", base),
            flash_url: format!("{}/getPadFlashingMachine", base),
            ota_url: format!("{}/engine/upgrade", base),
            ..Default::default()
        }
    }

    /// Per-request timeout, if configured
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Value sent as `devicemodel`
    pub fn device_model(&self, product_model: &str) -> String {
        format!("{}_{}", product_model, self.nation_code)
    }
}
