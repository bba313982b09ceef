//! Best-effort field extraction from the OTA endpoint's XML
//!
//! The OTA response is not reliably well-formed, so nothing here parses XML.
//! Fields are located by tag text, and anything missing means "no update"
//! rather than an error.

use fwrelay_core::OtaResult;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Pull the target version and download URL out of an OTA response.
///
/// Returns `None` unless the body has a `<firmware>` block containing both a
/// non-empty `<object_to_name>` and a CDATA-wrapped `<downloadurl>`.
pub fn extract_ota_update(body: &str) -> Option<OtaResult> {
    let firmware = element_text(body, "firmware")?;

    let version = element_text(firmware, "object_to_name")
        .map(str::trim)
        .filter(|v| !v.is_empty())?;
    let url = element_text(firmware, "downloadurl").and_then(cdata_text)?;

    Some(OtaResult {
        url: url.to_string(),
        version: version.to_string(),
    })
}

/// The vendor's `<result_msg>` explanation, if the response carries one
pub fn extract_result_message(body: &str) -> Option<&str> {
    element_text(body, "result_msg")
        .map(str::trim)
        .filter(|m| !m.is_empty())
}

/// Text between the first `<tag>` and the next `</tag>`
fn element_text<'a>(body: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);

    let start = body.find(&open)? + open.len();
    let len = body[start..].find(&close)?;
    Some(&body[start..start + len])
}

/// Trimmed content of a CDATA section that is the whole (trimmed) text
fn cdata_text(text: &str) -> Option<&str> {
    text.trim()
        .strip_prefix(CDATA_OPEN)?
        .strip_suffix(CDATA_CLOSE)
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
