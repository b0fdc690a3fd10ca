use tempfile::TempDir;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cartolink::config::{ConfigHandle, SdkConfig, TelemetryConfig};
use cartolink::telemetry::{EventKind, FileStore, KeyValueStore, Telemetry, storage_key};

use super::telemetry_harness::STYLE;

fn config(server: &MockServer, state_path: &std::path::Path) -> ConfigHandle {
    ConfigHandle::new(SdkConfig {
        access_token: Some("pk.abc".into()),
        telemetry: TelemetryConfig {
            events_url: format!("{}/events/v2", server.uri()),
            state_path: Some(state_path.display().to_string()),
            ..TelemetryConfig::default()
        },
        ..SdkConfig::default()
    })
}

#[tokio::test]
async fn delivers_text_plain_array_and_persists_to_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/v2"))
        .and(query_param("access_token", "pk.abc"))
        .and(header("content-type", "text/plain"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let state_path = tmp.path().join("state").join("telemetry.json");
    let telemetry = Telemetry::from_config(config(&server, &state_path));

    telemetry.report_resource_load(&[STYLE], 1);
    telemetry.wait_idle().await;

    let received = server
        .received_requests()
        .await
        .expect("mock server should record received requests");
    assert_eq!(received.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["event"], "map.load");
    assert_eq!(body[0]["sdkIdentifier"], "cartolink");

    let key = storage_key(&EventKind::ResourceLoad.storage_namespace(), Some("pk.abc"));
    let raw = FileStore::new(&state_path).get(&key).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(saved["anonymousId"], body[0]["userId"]);
    server.verify().await;
}

#[tokio::test]
async fn rejected_delivery_persists_nothing_and_retries_later() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/v2"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let state_path = tmp.path().join("telemetry.json");
    let telemetry = Telemetry::from_config(config(&server, &state_path));

    telemetry.report_usage_tick(&[STYLE]);
    telemetry.wait_idle().await;
    assert!(!state_path.exists());

    Mock::given(method("POST"))
        .and(path("/events/v2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    telemetry.report_usage_tick(&[STYLE]);
    telemetry.wait_idle().await;

    let key = storage_key(&EventKind::DailyUsage.storage_namespace(), Some("pk.abc"));
    assert!(FileStore::new(&state_path).get(&key).unwrap().is_some());
    server.verify().await;
}

#[tokio::test]
async fn corrupt_state_file_is_replaced_after_first_delivery() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/events/v2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(2)
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let state_path = tmp.path().join("telemetry.json");
    std::fs::write(&state_path, "{\"truncated").unwrap();

    let first = Telemetry::from_config(config(&server, &state_path));
    first.report_resource_load(&[STYLE], 1);
    first.wait_idle().await;

    let key = storage_key(&EventKind::ResourceLoad.storage_namespace(), Some("pk.abc"));
    let raw = FileStore::new(&state_path).get(&key).unwrap().unwrap();
    let saved: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(saved["anonymousId"].is_string());

    let second = Telemetry::from_config(config(&server, &state_path));
    second.report_resource_load(&[STYLE], 1);
    second.wait_idle().await;

    let received = server
        .received_requests()
        .await
        .expect("mock server should record received requests");
    let user_ids: Vec<serde_json::Value> = received
        .iter()
        .map(|request| {
            let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
            body[0]["userId"].clone()
        })
        .collect();
    assert_eq!(user_ids.len(), 2);
    assert_eq!(user_ids[0], saved["anonymousId"]);
    assert_eq!(user_ids[1], saved["anonymousId"]);
    server.verify().await;
}
