//! Full flash package descriptor

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_string, non_empty};

/// A complete firmware image plus flashing instructions for a model code.
///
/// `mtm` is not part of the vendor record; the lookup chain attaches the
/// model code the package was resolved for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlashPackage {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub product_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub latest_version: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub platform: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub flashing_machine_method: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub download_url: Option<String>,
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
    pub mtm: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FlashPackage {
    /// Product model, if the vendor supplied a non-empty one
    pub fn product_model(&self) -> Option<&str> {
        non_empty(self.product_model.as_deref())
    }
}
