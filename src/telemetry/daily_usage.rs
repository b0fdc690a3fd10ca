use super::EventKind;
use super::dispatcher::{Admission, AdmissionPolicy};
use super::payload::TelemetryPayload;
use super::state::EventState;
use crate::config::SdkConfig;
use chrono::{Datelike, Local, TimeZone};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// At most one `appUserTurnstile` event per local calendar day.
///
/// Entries are bare report timestamps (epoch millis). All dedup state lives
/// in the persisted [`EventState`], so the policy itself is stateless.
#[derive(Debug, Default)]
pub struct DailyUsagePolicy;

impl DailyUsagePolicy {
    pub fn new() -> Self {
        Self
    }
}

impl AdmissionPolicy for DailyUsagePolicy {
    type Entry = i64;

    fn kind(&self) -> EventKind {
        EventKind::DailyUsage
    }

    fn admit(&mut self, timestamp: &i64, state: &mut EventState, token: Option<&str>) -> Admission {
        let mut due = false;

        // A different token means a different account; identity continuity
        // does not carry over.
        if state
            .last_access_token
            .as_deref()
            .is_some_and(|previous| Some(previous) != token)
        {
            state.anonymous_id = None;
            state.last_success = None;
            due = true;
        }

        if state.ensure_identity() {
            due = true;
        }

        due = match state.last_success {
            None => true,
            Some(last) => {
                let elapsed = timestamp.saturating_sub(last);
                due || elapsed >= DAY_MILLIS
                    || elapsed < -DAY_MILLIS
                    || local_day_of_month(last) != local_day_of_month(*timestamp)
            }
        };

        if due {
            Admission::Send
        } else {
            Admission::SkipAndContinue
        }
    }

    fn build_payload(&self, timestamp: &i64, state: &EventState, config: &SdkConfig) -> TelemetryPayload {
        let mut payload = TelemetryPayload::new(self.kind(), *timestamp, state, config);
        payload.telemetry_enabled = Some(false);
        payload
    }

    fn on_success(&mut self, timestamp: &i64, state: &mut EventState, token: Option<&str>) {
        state.last_success = Some(*timestamp);
        state.last_access_token = token.map(ToOwned::to_owned);
    }
}

fn local_day_of_month(millis: i64) -> Option<u32> {
    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|moment| moment.day())
}
