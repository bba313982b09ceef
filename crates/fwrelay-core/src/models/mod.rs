//! Shared data models for the lookup chain and its front ends

use serde::{Deserialize, Deserializer};
use serde_json::Value;

mod machine;
mod ota;
mod package;
mod result;

pub use machine::*;
pub use ota::*;
pub use package::*;
pub use result::*;

/// Returns the trimmed value when it is present and non-empty
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Read a vendor column as text.
///
/// Strings pass through, numbers and booleans keep their JSON spelling, and
/// anything else (null, arrays, objects) counts as absent. The vendor is not
/// consistent about column types, and one odd column must not discard the
/// whole record.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}
