//! Vendor HTTP client implementation

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, instrument, warn};
use url::Url;

use fwrelay_core::{
    FlashPackage, MachineInfo, OtaRequest, OtaResult, VendorApi, VendorError, VendorResult,
    VendorService,
};

use crate::config::VendorConfig;
use crate::ota::{extract_ota_update, extract_result_message};

/// Status code the vendor puts in its JSON envelope on success
const VENDOR_OK: i64 = 200;

/// Client for the vendor's device-info, flash-package and OTA endpoints.
///
/// Each call is a single request with no retry. Non-success HTTP statuses
/// become [`VendorError::Transport`]; decodable bodies of an unexpected shape
/// become the empty sentinel (`None` or an empty list).
#[derive(Debug, Clone)]
pub struct VendorClient {
    client: Client,
    info_url: Url,
    flash_url: Url,
    ota_url: Url,
    config: VendorConfig,
}

impl VendorClient {
    /// Create a client for the production vendor endpoints
    pub fn new() -> VendorResult<Self> {
        Self::with_config(VendorConfig::default())
    }

    /// Create a client from explicit configuration
    pub fn with_config(config: VendorConfig) -> VendorResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| VendorError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            info_url: parse_url("info_url", &config.info_url)?,
            flash_url: parse_url("flash_url", &config.flash_url)?,
            ota_url: parse_url("ota_url", &config.ota_url)?,
            config,
        })
    }

    /// Get the configuration this client was built from
    pub fn config(&self) -> &VendorConfig {
        &self.config
    }

    // =========================================================================
    // Device info
    // =========================================================================

    /// Look up device metadata by serial number.
    ///
    /// Returns `None` unless the envelope's `StatusCode` is 200 and `data`
    /// holds a record.
    #[instrument(skip(self))]
    pub async fn machine_info(&self, sn: &str) -> VendorResult<Option<MachineInfo>> {
        let service = VendorService::MachineInfo;
        let url = self.machine_info_url(sn);
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error(service, e))?;
        let body: Value = decode_json(service, response).await?;

        let status_code = body.get("StatusCode").and_then(Value::as_i64);
        let message = body.get("Message").and_then(Value::as_str).unwrap_or("");
        debug!(status_code, message, "Device info response");

        if status_code != Some(VENDOR_OK) {
            return Ok(None);
        }

        match body.get("data") {
            Some(data) if !data.is_null() => Ok(lenient(service, data.clone())),
            _ => Ok(None),
        }
    }

    // =========================================================================
    // Flash packages
    // =========================================================================

    /// List full flash packages for a model code, in vendor order
    #[instrument(skip(self))]
    pub async fn flash_packages(&self, mtm: &str) -> VendorResult<Vec<FlashPackage>> {
        let service = VendorService::FlashPackage;
        let payload = json!({ "mtm": mtm });
        debug!("POST {}, payload: {}", self.flash_url, payload);

        let response = self
            .client
            .post(self.flash_url.clone())
            .header(
                reqwest::header::CONTENT_TYPE,
                "application/json;charset=UTF-8",
            )
            .body(payload.to_string())
            .send()
            .await
            .map_err(|e| request_error(service, e))?;
        let body: Value = decode_json(service, response).await?;

        let code = body.get("code").and_then(Value::as_i64);
        let records = body.get("data").and_then(Value::as_array);
        let count = records.map_or(0, Vec::len);
        debug!(code, count, "Flash package response");

        match records {
            // Decode per record so one malformed entry only drops itself
            Some(records) if code == Some(VENDOR_OK) => Ok(records
                .iter()
                .filter_map(|record| lenient(service, record.clone()))
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    // =========================================================================
    // OTA
    // =========================================================================

    /// Ask the OTA endpoint for an incremental update.
    ///
    /// Returns `None` when the response has no usable `<firmware>` section,
    /// which is how the vendor says "already up to date".
    #[instrument(skip(self))]
    pub async fn ota_update(&self, request: &OtaRequest) -> VendorResult<Option<OtaResult>> {
        let service = VendorService::Ota;
        let url = self.ota_url(request);
        let payload = json!({ "update_packages": [], "update_packages_data": [] });
        debug!("POST {}, payload: {}", url, payload);

        let response = self
            .client
            .post(url)
            .header(USER_AGENT, &self.config.ota_user_agent)
            .json(&payload)
            .send()
            .await
            .map_err(|e| request_error(service, e))?;
        let response = check_status(service, response)?;
        let body = response.text().await.map_err(|e| VendorError::Decode {
            service,
            message: e.to_string(),
        })?;
        debug!(body = %body, "OTA response");

        let update = extract_ota_update(&body);
        if update.is_none() {
            debug!(
                result_msg = extract_result_message(&body).unwrap_or("no firmware section"),
                "No OTA firmware in response"
            );
        }
        Ok(update)
    }

    /// Device-info URL for a serial number
    pub fn machine_info_url(&self, sn: &str) -> Url {
        let mut url = self.info_url.clone();
        url.query_pairs_mut().append_pair("MachineNo", sn);
        url
    }

    /// OTA query URL, parameters in the order the vendor's own client sends them
    pub fn ota_url(&self, request: &OtaRequest) -> Url {
        let mut url = self.ota_url.clone();
        url.query_pairs_mut()
            .append_pair("curfirmwarever", &request.current_version)
            .append_pair("action", "querynewfirmwar")
            .append_pair("pid", &self.config.pid)
            .append_pair("locale", &self.config.locale)
            .append_pair("deviceid", &request.device_id)
            .append_pair("ChecksumType", &self.config.checksum_type)
            .append_pair("nationcode", &self.config.nation_code)
            .append_pair(
                "devicemodel",
                &self.config.device_model(&request.product_model),
            )
            .append_pair("ram", &self.config.ram.to_string());
        url
    }
}

#[async_trait]
impl VendorApi for VendorClient {
    async fn fetch_machine_info(&self, sn: &str) -> VendorResult<Option<MachineInfo>> {
        self.machine_info(sn).await
    }

    async fn fetch_flash_packages(&self, mtm: &str) -> VendorResult<Vec<FlashPackage>> {
        self.flash_packages(mtm).await
    }

    async fn fetch_ota(&self, request: &OtaRequest) -> VendorResult<Option<OtaResult>> {
        self.ota_update(request).await
    }
}

fn parse_url(name: &str, value: &str) -> VendorResult<Url> {
    Url::parse(value).map_err(|e| VendorError::Config(format!("{} '{}': {}", name, value, e)))
}

fn request_error(service: VendorService, err: reqwest::Error) -> VendorError {
    warn!(%service, error = %err, "Vendor request failed");
    VendorError::Request {
        service,
        message: err.to_string(),
    }
}

fn check_status(service: VendorService, response: Response) -> VendorResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%service, status = status.as_u16(), "Vendor returned error status");
        Err(VendorError::transport(service, status.as_u16()))
    }
}

async fn decode_json<T: DeserializeOwned>(
    service: VendorService,
    response: Response,
) -> VendorResult<T> {
    check_status(service, response)?
        .json()
        .await
        .map_err(|e| VendorError::Decode {
            service,
            message: e.to_string(),
        })
}

/// Decode a payload fragment, treating a shape mismatch as absent
fn lenient<T: DeserializeOwned>(service: VendorService, value: Value) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            warn!(%service, error = %e, "Unexpected payload shape, treating as empty");
            None
        }
    }
}
