//! Anonymous usage telemetry.
//!
//! Two event types share one delivery engine ([`Dispatcher`]):
//!
//! - `map.load`: once per rendering subject per process ([`ResourceLoadPolicy`]).
//! - `appUserTurnstile`: at most once per local calendar day ([`DailyUsagePolicy`]).
//!
//! Nothing here surfaces errors to the caller. Delivery, storage and
//! endpoint failures are logged and swallowed.

pub mod clock;
pub mod daily_usage;
pub mod dispatcher;
pub mod identity;
pub mod payload;
pub mod resource_load;
pub mod state;
pub mod storage;
pub mod transport;

pub use clock::{Clock, ManualClock, SystemClock};
pub use daily_usage::DailyUsagePolicy;
pub use dispatcher::{Admission, AdmissionPolicy, Dispatcher};
pub use payload::TelemetryPayload;
pub use resource_load::{ResourceLoad, ResourceLoadPolicy};
pub use state::{EventState, storage_key};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use transport::{HttpTransport, TelemetryRequest, Transport};

use crate::config::ConfigHandle;
use std::sync::Arc;
use strum::{Display, IntoStaticStr};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum EventKind {
    #[strum(serialize = "map.load")]
    ResourceLoad,
    #[strum(serialize = "appUserTurnstile")]
    DailyUsage,
}

impl EventKind {
    /// Wire name of the event.
    pub fn event_name(self) -> &'static str {
        self.into()
    }

    /// Storage namespace; the persisted key appends `:<token>`.
    pub fn storage_namespace(self) -> String {
        format!("cartolink.telemetry.{}", self.event_name())
    }
}

/// Process-wide telemetry context: one dispatcher per event type.
#[derive(Clone)]
pub struct Telemetry {
    resource_load: Dispatcher<ResourceLoadPolicy>,
    daily_usage: Dispatcher<DailyUsagePolicy>,
    clock: Arc<dyn Clock>,
}

impl Telemetry {
    pub fn new(
        config: ConfigHandle,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            resource_load: Dispatcher::new(
                ResourceLoadPolicy::new(),
                config.clone(),
                Arc::clone(&store),
                Arc::clone(&transport),
            ),
            daily_usage: Dispatcher::new(DailyUsagePolicy::new(), config, store, transport),
            clock,
        }
    }

    /// Production wiring: HTTP delivery, the system clock, and a file store
    /// when `telemetry.state_path` is configured (process memory otherwise).
    pub fn from_config(config: ConfigHandle) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.load().telemetry.resolved_state_path() {
            Some(path) => {
                debug!(path = %path.display(), "telemetry state persisted to file");
                Arc::new(FileStore::new(path))
            }
            None => Arc::new(MemoryStore::new()),
        };
        Self::new(
            config,
            store,
            Arc::new(HttpTransport::new()),
            Arc::new(SystemClock),
        )
    }

    /// A rendering subject finished loading `resources`.
    pub fn report_resource_load<S: AsRef<str>>(&self, resources: &[S], subject_id: u64) {
        let entry = ResourceLoad {
            subject_id,
            timestamp: self.clock.now_millis(),
        };
        self.resource_load.report(entry, resources);
    }

    /// Periodic activity tick; delivers at most once per local day.
    pub fn report_usage_tick<S: AsRef<str>>(&self, resources: &[S]) {
        self.daily_usage.report(self.clock.now_millis(), resources);
    }

    pub fn resource_load(&self) -> &Dispatcher<ResourceLoadPolicy> {
        &self.resource_load
    }

    pub fn daily_usage(&self) -> &Dispatcher<DailyUsagePolicy> {
        &self.daily_usage
    }

    /// Resolve once neither dispatcher has a delivery in flight.
    pub async fn wait_idle(&self) {
        self.resource_load.wait_idle().await;
        self.daily_usage.wait_idle().await;
    }
}
