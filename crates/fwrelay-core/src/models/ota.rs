//! Incremental OTA update descriptor

use serde::{Deserialize, Serialize};

/// An incremental update available from the queried firmware version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtaResult {
    /// Download URL of the incremental package
    pub url: String,
    /// Target firmware version after applying the package
    pub version: String,
}
