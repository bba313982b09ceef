//! HTTP relay over the stub vendor
//!
//! Run with: cargo test -p fwrelay-tests --test relay_e2e_test

use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{json, Value};

use fwrelay_client::VendorService;
use fwrelay_tests::{tablet_vendor, RelayFixture};

async fn body(response: reqwest::Response) -> Value {
    response.json().await.unwrap()
}

// =============================================================================
// Full package lookups
// =============================================================================

#[tokio::test]
async fn test_sn_resolves_full_package() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture.post(json!({ "sn": "HA29117A" })).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["mtm"], "82XX");
    assert_eq!(body["machineInfo"]["MTM"], "82XX");
    assert_eq!(body["machineInfo"]["SaleArea"], "PRC");
    assert_eq!(body["fullPackage"]["mtm"], "82XX");
    assert_eq!(body["fullPackage"]["latest_version"], "TB710FU_CN_17.0.04.279");
    assert!(body.get("otaPackage").is_none());

    // No version, no OTA request
    assert!(fixture.stub.requests_for(VendorService::Ota).is_empty());
    let flash = fixture.stub.requests_for(VendorService::FlashPackage);
    assert_eq!(flash[0].body, Some(json!({ "mtm": "82XX" })));
}

#[tokio::test]
async fn test_lowercase_sn_is_normalized() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture.post(json!({ "sn": "  ha29117a " })).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let info = fixture.stub.requests_for(VendorService::MachineInfo);
    assert_eq!(
        info[0].query.get("MachineNo").map(String::as_str),
        Some("HA29117A")
    );
}

#[tokio::test]
async fn test_unknown_sn_falls_back_to_mtm() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture
        .post(json!({ "sn": "NOSUCHSN", "mtm": "82XX" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert!(body.get("machineInfo").is_none());
    assert_eq!(body["fullPackage"]["mtm"], "82XX");
    assert_eq!(fixture.stub.requests_for(VendorService::MachineInfo).len(), 1);
}

#[tokio::test]
async fn test_mtm_only_skips_device_info() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture.post(json!({ "mtm": "82xx" })).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(fixture
        .stub
        .requests_for(VendorService::MachineInfo)
        .is_empty());
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_missing_keys_is_400_without_vendor_calls() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture
        .post(json!({ "currentFirmwareVersion": "V1" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(response).await["success"], false);
    assert!(fixture.stub.requests().is_empty());
}

#[tokio::test]
async fn test_sn_without_mtm_fails_no_mtm() {
    let stub = tablet_vendor().machine("HA00000B", json!({ "MachineName": "Tab" }));
    let fixture = RelayFixture::start(stub).await.unwrap();

    let response = fixture.post(json!({ "sn": "HA00000B" })).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(response).await;
    assert_eq!(body["errorKind"], "no_mtm");
    assert!(fixture
        .stub
        .requests_for(VendorService::FlashPackage)
        .is_empty());
}

#[tokio::test]
async fn test_empty_package_list_names_mtm() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture.post(json!({ "mtm": "83HR" })).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["errorKind"], "no_package");
    assert_eq!(body["mtm"], "83HR");
    assert!(body["error"].as_str().unwrap().contains("83HR"));
}

#[tokio::test]
async fn test_vendor_503_is_500_transport_error() {
    let stub = tablet_vendor().fail(VendorService::MachineInfo, 503);
    let fixture = RelayFixture::start(stub).await.unwrap();

    let response = fixture.post(json!({ "sn": "HA29117A" })).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(response).await;
    assert_eq!(body["errorKind"], "transport");
    assert!(body["error"].as_str().unwrap().contains("503"));
    assert!(fixture
        .stub
        .requests_for(VendorService::FlashPackage)
        .is_empty());
}

// =============================================================================
// OTA
// =============================================================================

#[tokio::test]
async fn test_firmware_version_adds_ota_package() {
    let stub = tablet_vendor().ota_update("TB710FU_CN_17.0.05.100", "https://ota.example/d.zip");
    let fixture = RelayFixture::start(stub).await.unwrap();

    let response = fixture
        .post(json!({ "sn": "HA29117A", "currentFirmwareVersion": "TB710FU_CN_17.0.04.279" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(
        body["otaPackage"],
        json!({ "url": "https://ota.example/d.zip", "version": "TB710FU_CN_17.0.05.100" })
    );

    let ota = fixture.stub.requests_for(VendorService::Ota).remove(0);
    let param = |k: &str| ota.query.get(k).cloned();
    assert_eq!(param("deviceid").as_deref(), Some("HA29117A"));
    assert_eq!(param("devicemodel").as_deref(), Some("TB710FU_CN"));
    assert_eq!(
        param("curfirmwarever").as_deref(),
        Some("TB710FU_CN_17.0.04.279")
    );
}

#[tokio::test]
async fn test_no_update_is_success_without_ota_package() {
    let fixture = RelayFixture::start(tablet_vendor()).await.unwrap();

    let response = fixture
        .post(json!({ "sn": "HA29117A", "currentFirmwareVersion": "V1" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body(response).await;
    assert_eq!(body["success"], true);
    assert!(body.get("otaPackage").is_none());
    assert_eq!(fixture.stub.requests_for(VendorService::Ota).len(), 1);
}

#[tokio::test]
async fn test_mtm_lookup_uses_package_product_model_as_device_id() {
    let stub = tablet_vendor()
        .packages(
            "83HR",
            json!([{ "latest_version": "V1", "product_model": "TB320FC" }]),
        )
        .ota_update("V2", "https://ota.example/v2.zip");
    let fixture = RelayFixture::start(stub).await.unwrap();

    let response = fixture
        .post(json!({ "mtm": "83HR", "currentFirmwareVersion": "V1" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let ota = fixture.stub.requests_for(VendorService::Ota).remove(0);
    assert_eq!(ota.query.get("deviceid").map(String::as_str), Some("TB320FC"));
    assert_eq!(
        ota.query.get("devicemodel").map(String::as_str),
        Some("TB320FC_CN")
    );
}

#[tokio::test]
async fn test_ota_failure_fails_whole_lookup() {
    let stub = tablet_vendor().fail(VendorService::Ota, 502);
    let fixture = RelayFixture::start(stub).await.unwrap();

    let response = fixture
        .post(json!({ "sn": "HA29117A", "currentFirmwareVersion": "V1" }))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body(response).await;
    assert!(body.get("fullPackage").is_none());
    assert!(body["error"].as_str().unwrap().contains("OTA"));
}
