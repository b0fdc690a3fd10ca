use super::EventKind;
use super::dispatcher::{Admission, AdmissionPolicy};
use super::payload::TelemetryPayload;
use super::state::EventState;
use crate::config::SdkConfig;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceLoad {
    pub subject_id: u64,
    pub timestamp: i64,
}

/// One `map.load` event per subject per process.
#[derive(Debug, Default)]
pub struct ResourceLoadPolicy {
    delivered: HashSet<u64>,
}

impl ResourceLoadPolicy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AdmissionPolicy for ResourceLoadPolicy {
    type Entry = ResourceLoad;

    fn kind(&self) -> EventKind {
        EventKind::ResourceLoad
    }

    // A duplicate halts draining rather than moving on to the next entry;
    // anything queued behind it waits for the next report.
    fn admit(&mut self, entry: &ResourceLoad, _: &mut EventState, _: Option<&str>) -> Admission {
        if self.delivered.contains(&entry.subject_id) {
            Admission::SkipAndStop
        } else {
            Admission::Send
        }
    }

    fn build_payload(
        &self,
        entry: &ResourceLoad,
        state: &EventState,
        config: &SdkConfig,
    ) -> TelemetryPayload {
        let mut payload = TelemetryPayload::new(self.kind(), entry.timestamp, state, config);
        payload.sku_token.clone_from(&config.sku_token);
        payload
    }

    fn on_success(&mut self, entry: &ResourceLoad, _: &mut EventState, _: Option<&str>) {
        self.delivered.insert(entry.subject_id);
    }
}
