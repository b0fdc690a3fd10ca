use cartolink::telemetry::{EventKind, EventState, KeyValueStore, storage_key};

use super::telemetry_harness::{STYLE, fixture, local_millis};

fn saved_state(store: &dyn KeyValueStore, token: &str) -> Option<EventState> {
    let key = storage_key(&EventKind::DailyUsage.storage_namespace(), Some(token));
    store
        .get(&key)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
}

#[tokio::test]
async fn one_delivery_per_calendar_day() {
    let f = fixture(Some("pk.abc"), local_millis(10, 8, 0));

    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;
    f.clock.set(local_millis(10, 22, 0));
    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;
    assert_eq!(f.transport.count("appUserTurnstile"), 1);

    // Minutes later, but past midnight.
    f.clock.set(local_millis(11, 0, 5));
    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;
    assert_eq!(f.transport.count("appUserTurnstile"), 2);

    let saved = saved_state(f.store.as_ref(), "pk.abc").unwrap();
    assert_eq!(saved.last_success, Some(local_millis(11, 0, 5)));
    assert_eq!(saved.last_access_token.as_deref(), Some("pk.abc"));
}

#[tokio::test]
async fn token_rotation_forces_delivery_with_new_identity() {
    let f = fixture(Some("pk.first"), local_millis(10, 8, 0));

    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;

    f.config.set_access_token(Some("pk.second".into()));
    f.clock.advance(60_000);
    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;

    let events = f.transport.events();
    assert_eq!(events.len(), 2);
    assert_ne!(events[0]["userId"], events[1]["userId"]);
    assert!(events.iter().all(|e| e["enabled.telemetry"] == false));

    let first = saved_state(f.store.as_ref(), "pk.first").unwrap();
    let second = saved_state(f.store.as_ref(), "pk.second").unwrap();
    assert_eq!(second.last_access_token.as_deref(), Some("pk.second"));
    assert_ne!(first.anonymous_id, second.anonymous_id);
}

#[tokio::test]
async fn ticks_without_token_are_dropped() {
    let f = fixture(None, local_millis(10, 8, 0));

    f.telemetry.report_usage_tick(&[STYLE]);
    f.telemetry.wait_idle().await;

    assert!(f.transport.events().is_empty());
    assert_eq!(f.telemetry.daily_usage().queued(), 0);
}
