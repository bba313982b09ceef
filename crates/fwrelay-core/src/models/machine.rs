//! Device metadata returned by the serial number lookup

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_string, non_empty};

/// Device metadata resolved from a serial number.
///
/// Field names follow the vendor payload (PascalCase). Fields the relay does
/// not model are kept in `extra` so the record can be passed on verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MachineInfo {
    /// Model/type code identifying the firmware family
    #[serde(
        rename = "MTM",
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub mtm: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub machine_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub scan_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sale_area: Option<String>,
    /// Marketing model (e.g. "TB710FU"), used as the OTA device model
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_model: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_series: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_small_class: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_big_class: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MachineInfo {
    /// Model code, if the vendor supplied a non-empty one
    pub fn model_code(&self) -> Option<&str> {
        non_empty(self.mtm.as_deref())
    }

    /// Product model, if the vendor supplied a non-empty one
    pub fn product_model(&self) -> Option<&str> {
        non_empty(self.product_model.as_deref())
    }
}
