//! Integration tests for fwrelay-client
//!
//! These tests run the stub vendor on a local port and drive the real
//! `VendorClient` against it over HTTP.

use pretty_assertions::assert_eq;
use serde_json::json;

use fwrelay_client::testing::StubVendor;
use fwrelay_client::{OtaRequest, OtaResult, VendorClient, VendorError, VendorService};

fn ota_request() -> OtaRequest {
    OtaRequest {
        device_id: "HA29117A".to_string(),
        product_model: "TB710FU".to_string(),
        current_version: "TB710FU_CN_V_ZUI_17.0.04.279".to_string(),
    }
}

// =============================================================================
// Device info
// =============================================================================

#[tokio::test]
async fn test_machine_info_returns_vendor_record() {
    let stub = StubVendor::new().machine(
        "HA29117A",
        json!({ "MTM": "82XX", "ProductModel": "TB710FU", "SaleArea": "PRC" }),
    );
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let info = client.machine_info("HA29117A").await.unwrap().unwrap();

    assert_eq!(info.model_code(), Some("82XX"));
    assert_eq!(info.sale_area.as_deref(), Some("PRC"));
    let requests = stub.requests_for(VendorService::MachineInfo);
    assert_eq!(requests[0].query.get("MachineNo").map(String::as_str), Some("HA29117A"));
}

#[tokio::test]
async fn test_machine_info_keeps_record_with_numeric_column() {
    let stub = StubVendor::new().machine(
        "HA29117A",
        json!({ "MTM": "82XX", "ProductModel": "TB710FU", "ScanDate": 20250301 }),
    );
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let info = client.machine_info("HA29117A").await.unwrap().unwrap();

    assert_eq!(info.model_code(), Some("82XX"));
    assert_eq!(info.product_model(), Some("TB710FU"));
    assert_eq!(info.scan_date.as_deref(), Some("20250301"));
}

#[tokio::test]
async fn test_machine_info_unknown_sn_is_none() {
    let stub = StubVendor::new();
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    assert_eq!(client.machine_info("NOPE").await.unwrap(), None);
}

#[tokio::test]
async fn test_machine_info_null_data_is_none() {
    let stub = StubVendor::new().machine("HA29117A", serde_json::Value::Null);
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    assert_eq!(client.machine_info("HA29117A").await.unwrap(), None);
}

#[tokio::test]
async fn test_machine_info_http_failure_is_transport_error() {
    let stub = StubVendor::new().fail(VendorService::MachineInfo, 503);
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let err = client.machine_info("HA29117A").await.unwrap_err();

    assert!(matches!(
        err,
        VendorError::Transport {
            service: VendorService::MachineInfo,
            status: 503
        }
    ));
}

#[tokio::test]
async fn test_unreachable_vendor_is_request_error() {
    let stub = StubVendor::new();
    let server = stub.start().await.unwrap();
    let config = stub.config_for(&server);
    server.shutdown().await;

    let client = VendorClient::with_config(config).unwrap();
    let err = client.machine_info("HA29117A").await.unwrap_err();

    assert!(matches!(err, VendorError::Request { .. }));
}

// =============================================================================
// Flash packages
// =============================================================================

#[tokio::test]
async fn test_flash_packages_posts_mtm_and_keeps_order() {
    let stub = StubVendor::new().packages(
        "82XX",
        json!([
            { "product_name": "Tab", "latest_version": "V2", "product_model": "TB710FU" },
            { "product_name": "Tab", "latest_version": "V1" }
        ]),
    );
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let packages = client.flash_packages("82XX").await.unwrap();

    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].latest_version.as_deref(), Some("V2"));
    assert_eq!(packages[0].product_model(), Some("TB710FU"));
    let requests = stub.requests_for(VendorService::FlashPackage);
    assert_eq!(requests[0].body, Some(json!({ "mtm": "82XX" })));
}

#[tokio::test]
async fn test_flash_packages_keep_records_around_an_odd_one() {
    let stub = StubVendor::new().packages(
        "82XX",
        json!([
            { "latest_version": "V1", "download_url": "https://dl.example/v1.zip" },
            { "latest_version": 2, "platform": ["MTK"] },
            "not a record"
        ]),
    );
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let packages = client.flash_packages("82XX").await.unwrap();

    assert_eq!(packages.len(), 2);
    assert_eq!(packages[0].latest_version.as_deref(), Some("V1"));
    assert_eq!(packages[1].latest_version.as_deref(), Some("2"));
    assert_eq!(packages[1].platform, None);
}

#[tokio::test]
async fn test_flash_packages_non_array_data_is_empty() {
    let stub = StubVendor::new().packages("82XX", json!({ "unexpected": true }));
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    assert!(client.flash_packages("82XX").await.unwrap().is_empty());
    assert!(client.flash_packages("UNKNOWN").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_flash_packages_http_failure_is_transport_error() {
    let stub = StubVendor::new().fail(VendorService::FlashPackage, 500);
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let err = client.flash_packages("82XX").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

// =============================================================================
// OTA
// =============================================================================

#[tokio::test]
async fn test_ota_sends_device_headers_and_query() {
    let stub = StubVendor::new().ota_update("V2", "https://ota.example/delta.zip");
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let update = client.ota_update(&ota_request()).await.unwrap();

    assert_eq!(
        update,
        Some(OtaResult {
            url: "https://ota.example/delta.zip".to_string(),
            version: "V2".to_string(),
        })
    );

    let request = stub.requests_for(VendorService::Ota).remove(0);
    let param = |k: &str| request.query.get(k).map(String::as_str);
    assert_eq!(param("curfirmwarever"), Some("TB710FU_CN_V_ZUI_17.0.04.279"));
    assert_eq!(param("action"), Some("querynewfirmwar"));
    assert_eq!(param("pid"), Some(""));
    assert_eq!(param("locale"), Some("zh"));
    assert_eq!(param("deviceid"), Some("HA29117A"));
    assert_eq!(param("ChecksumType"), Some("sha256"));
    assert_eq!(param("nationcode"), Some("CN"));
    assert_eq!(param("devicemodel"), Some("TB710FU_CN"));
    assert_eq!(param("ram"), Some("8"));
    assert_eq!(
        request.body,
        Some(json!({ "update_packages": [], "update_packages_data": [] }))
    );
    assert!(request.user_agent.unwrap().starts_with("Dalvik/2.1.0"));
}

#[tokio::test]
async fn test_ota_without_firmware_is_none() {
    let stub = StubVendor::new();
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    assert_eq!(client.ota_update(&ota_request()).await.unwrap(), None);
}

#[tokio::test]
async fn test_ota_http_failure_is_transport_error() {
    let stub = StubVendor::new().fail(VendorService::Ota, 502);
    let server = stub.start().await.unwrap();
    let client = VendorClient::with_config(stub.config_for(&server)).unwrap();

    let err = client.ota_update(&ota_request()).await.unwrap_err();
    assert_eq!(err.to_string(), "OTA lookup failed with HTTP status 502");
}
