//! Lookup handler

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use fwrelay_core::{LookupQuery, LookupResult};

use crate::error::ApiError;
use crate::state::AppState;

/// POST / and POST /query
///
/// Body: `{"sn": ..., "mtm": ..., "currentFirmwareVersion": ...}`, all
/// optional but at least one of `sn`/`mtm` required. Answers 200 with the
/// `LookupResult` on success and 500 with the failed `LookupResult`
/// otherwise.
pub async fn lookup(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<LookupResult>), ApiError> {
    let query: LookupQuery = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("internal error: {}", e)))?;
    let query = query.normalized();

    if !query.has_key() {
        return Err(ApiError::BadRequest(
            "serial number (SN) or model code (MTM) required".to_string(),
        ));
    }

    info!(
        sn = query.sn.as_deref().unwrap_or("-"),
        mtm = query.mtm.as_deref().unwrap_or("-"),
        ota = query.current_firmware_version.is_some(),
        "Lookup request"
    );

    let result = state.lookup().resolve(&query).await;
    let status = if result.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(result)))
}

/// Any other method on the lookup routes
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed("Method Not Allowed. Use POST.".to_string())
}
