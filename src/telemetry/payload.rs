use super::EventKind;
use super::state::EventState;
use super::transport::{TELEMETRY_CONTENT_TYPE, TelemetryRequest};
use crate::config::SdkConfig;
use crate::error::LocatorError;
use crate::locator;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// One telemetry event as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryPayload {
    pub event: &'static str,
    pub created: String,
    pub sdk_identifier: String,
    pub sdk_version: String,
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku_token: Option<String>,
    #[serde(
        rename = "enabled.telemetry",
        skip_serializing_if = "Option::is_none"
    )]
    pub telemetry_enabled: Option<bool>,
}

impl TelemetryPayload {
    /// Fields shared by every event type.
    pub fn new(kind: EventKind, timestamp: i64, state: &EventState, config: &SdkConfig) -> Self {
        Self {
            event: kind.event_name(),
            created: iso_timestamp(timestamp),
            sdk_identifier: config.telemetry.sdk_identifier.clone(),
            sdk_version: config.telemetry.sdk_version.clone(),
            user_id: state.anonymous_id.clone(),
            sku_token: None,
            telemetry_enabled: None,
        }
    }
}

/// `2024-05-10T09:00:00.000Z`; out-of-range millis fall back to the epoch.
pub fn iso_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Wrap `payload` into the single-element JSON array the endpoint expects,
/// addressed to the events endpoint with `token` as a query param.
pub fn build_request(
    payload: &TelemetryPayload,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<TelemetryRequest, LocatorError> {
    let mut endpoint = locator::parse(&config.telemetry.events_url)?;
    endpoint
        .params
        .push(format!("access_token={}", token.unwrap_or_default()));

    // Serializing plain strings and options cannot fail.
    let body = serde_json::to_string(&[payload]).unwrap_or_else(|_| "[]".into());

    Ok(TelemetryRequest {
        url: endpoint.to_string(),
        content_type: TELEMETRY_CONTENT_TYPE,
        body,
    })
}
