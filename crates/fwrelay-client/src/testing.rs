//! Test utilities for fwrelay-client
//!
//! Provides a scriptable stand-in for the vendor endpoints and a server
//! wrapper that runs any axum router on a free local port.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use fwrelay_core::VendorService;

use crate::config::VendorConfig;

/// Body the stub returns from the OTA endpoint when no update is scripted
pub const NO_UPDATE_XML: &str =
    "<response><result_code>0</result_code><result_msg>already the latest version</result_msg></response>";

/// A test server that automatically shuts down when dropped
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl TestServer {
    /// Serve an axum Router on an ephemeral local port
    ///
    /// # Example
    ///
    /// ```ignore
    /// use fwrelay_client::testing::TestServer;
    ///
    /// let server = TestServer::start(router).await?;
    /// let response = reqwest::get(server.url("/health")).await?;
    /// ```
    pub async fn start(router: Router) -> std::io::Result<Self> {
        // Bind to any available port
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        // Give server a moment to start
        tokio::time::sleep(Duration::from_millis(10)).await;

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Get the base URL of the test server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL for a path on the test server
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Shutdown the server gracefully
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// One request received by the stub vendor
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub service: VendorService,
    pub query: HashMap<String, String>,
    pub body: Option<Value>,
    pub user_agent: Option<String>,
}

/// Scriptable stand-in for the three vendor endpoints.
///
/// Unknown serial numbers answer like the real vendor does (`StatusCode`
/// 400, no data); unknown model codes get an empty package list; the OTA
/// endpoint answers [`NO_UPDATE_XML`] unless a body is scripted.
#[derive(Debug, Clone, Default)]
pub struct StubVendor {
    machines: HashMap<String, Value>,
    packages: HashMap<String, Value>,
    ota_body: Option<String>,
    failures: HashMap<VendorService, u16>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubVendor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer the device-info endpoint for `sn` with `data`
    pub fn machine(mut self, sn: &str, data: Value) -> Self {
        self.machines.insert(sn.to_string(), data);
        self
    }

    /// Answer the flash-package endpoint for `mtm` with `data` (normally an array)
    pub fn packages(mut self, mtm: &str, data: Value) -> Self {
        self.packages.insert(mtm.to_string(), data);
        self
    }

    /// Answer the OTA endpoint with a raw body
    pub fn ota_body(mut self, body: impl Into<String>) -> Self {
        self.ota_body = Some(body.into());
        self
    }

    /// Answer the OTA endpoint with a well-formed update
    pub fn ota_update(self, version: &str, url: &str) -> Self {
        self.ota_body(format!(
            "<response><firmware><object_to_name>{}</object_to_name>\
             <downloadurl><![CDATA[{}]]></downloadurl></firmware></response>",
            version, url
        ))
    }

    /// Make an endpoint fail with an HTTP status
    pub fn fail(mut self, service: VendorService, status: u16) -> Self {
        self.failures.insert(service, status);
        self
    }

    /// Requests received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    /// Requests received so far for one endpoint
    pub fn requests_for(&self, service: VendorService) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.service == service)
            .collect()
    }

    /// Router serving the vendor's paths (see [`VendorConfig::with_base_url`])
    pub fn router(&self) -> Router {
        Router::new()
            .route("/getMachineSequenceInfo", get(machine_info))
            .route("/getPadFlashingMachine", post(flash_packages))
            .route("/engine/upgrade", post(ota))
            .with_state(Arc::new(self.clone()))
    }

    /// Start the stub on a local port
    pub async fn start(&self) -> std::io::Result<TestServer> {
        TestServer::start(self.router()).await
    }

    /// Client configuration aimed at a running stub
    pub fn config_for(&self, server: &TestServer) -> VendorConfig {
        VendorConfig::with_base_url(&server.base_url())
    }

    fn record(
        &self,
        service: VendorService,
        query: HashMap<String, String>,
        body: Option<Value>,
        headers: &HeaderMap,
    ) -> Option<Response> {
        self.requests.lock().push(RecordedRequest {
            service,
            query,
            body,
            user_agent: headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(String::from),
        });

        self.failures.get(&service).map(|status| {
            let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, "stub failure").into_response()
        })
    }
}

async fn machine_info(
    State(stub): State<Arc<StubVendor>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let sn = query.get("MachineNo").cloned().unwrap_or_default();
    if let Some(failure) = stub.record(VendorService::MachineInfo, query, None, &headers) {
        return failure;
    }

    match stub.machines.get(&sn) {
        Some(data) => Json(json!({ "StatusCode": 200, "Message": "success", "data": data })),
        None => Json(json!({ "StatusCode": 400, "Message": "no such machine", "data": null })),
    }
    .into_response()
}

async fn flash_packages(
    State(stub): State<Arc<StubVendor>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let payload: Option<Value> = serde_json::from_str(&body).ok();
    let mtm = payload
        .as_ref()
        .and_then(|p| p.get("mtm"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    if let Some(failure) =
        stub.record(VendorService::FlashPackage, HashMap::new(), payload, &headers)
    {
        return failure;
    }

    let data = stub.packages.get(&mtm).cloned().unwrap_or_else(|| json!([]));
    Json(json!({ "code": 200, "msg": "success", "data": data })).into_response()
}

async fn ota(
    State(stub): State<Arc<StubVendor>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let payload = serde_json::from_str(&body).ok();
    if let Some(failure) = stub.record(VendorService::Ota, query, payload, &headers) {
        return failure;
    }

    let body = stub
        .ota_body
        .clone()
        .unwrap_or_else(|| NO_UPDATE_XML.to_string());
    ([(header::CONTENT_TYPE, "text/xml;charset=UTF-8")], body).into_response()
}
