use super::telemetry_harness::{STYLE, fixture, local_millis};

#[tokio::test]
async fn same_subject_reported_twice_delivers_once() {
    let f = fixture(Some("pk.abc"), local_millis(10, 9, 0));

    f.telemetry.report_resource_load(&[STYLE], 42);
    f.telemetry.report_resource_load(&[STYLE], 42);
    f.telemetry.wait_idle().await;

    assert_eq!(f.transport.count("map.load"), 1);
    assert_eq!(f.telemetry.resource_load().queued(), 0);

    f.telemetry.report_resource_load(&[STYLE], 42);
    f.telemetry.wait_idle().await;
    assert_eq!(f.transport.count("map.load"), 1);
}

#[tokio::test]
async fn distinct_subjects_each_deliver_with_sku() {
    let f = fixture(Some("pk.abc"), local_millis(10, 9, 0));

    f.telemetry.report_resource_load(&[STYLE], 1);
    f.telemetry.report_resource_load(&[STYLE], 2);
    f.telemetry.wait_idle().await;

    let events = f.transport.events();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e["skuToken"] == "sku-test"));
    assert_eq!(events[0]["userId"], events[1]["userId"]);
}

#[tokio::test]
async fn third_party_only_resources_send_nothing() {
    let f = fixture(Some("pk.abc"), local_millis(10, 9, 0));

    f.telemetry
        .report_resource_load(&["https://tiles.example.org/style.json"], 1);
    f.telemetry.wait_idle().await;

    assert!(f.transport.events().is_empty());
}

#[tokio::test]
async fn private_scheme_resources_alone_send_nothing() {
    let f = fixture(Some("pk.abc"), local_millis(10, 9, 0));

    f.telemetry
        .report_resource_load(&["mapservice://styles/user/style"], 1);
    f.telemetry.report_usage_tick(&["mapservice://styles/user/style"]);
    f.telemetry.wait_idle().await;

    assert!(f.transport.events().is_empty());
}

#[tokio::test]
async fn first_party_http_resources_are_eligible() {
    let f = fixture(Some("pk.abc"), local_millis(10, 9, 0));

    f.telemetry.report_resource_load(
        &[
            "https://tiles.example.org/style.json",
            "https://api.example-mapservice.com/styles/v1/user/style",
        ],
        1,
    );
    f.telemetry.wait_idle().await;

    assert_eq!(f.transport.count("map.load"), 1);
}
