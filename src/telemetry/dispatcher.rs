//! Serialized delivery queue shared by every telemetry event type.
//!
//! A dispatcher owns one FIFO queue, one in-flight slot and one cached
//! [`EventState`]. The event-specific rules live in an [`AdmissionPolicy`].
//! All bookkeeping happens under a single mutex that is never held across an
//! `.await`; the only suspension point is the transport call, which runs in
//! a spawned task that *is* the in-flight slot.

use super::EventKind;
use super::payload::{TelemetryPayload, build_request};
use super::state::{EventState, storage_key};
use super::storage::KeyValueStore;
use super::transport::Transport;
use crate::config::{ConfigHandle, SdkConfig};
use crate::error::{StorageError, TransportError};
use crate::locator::is_first_party_http;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::watch;
use tracing::{debug, warn};

/// What to do with the entry just popped off the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Send,
    /// Drop the entry and consider the next one.
    SkipAndContinue,
    /// Drop the entry and leave the rest of the queue for the next dispatch.
    SkipAndStop,
}

/// Per-event-type rules plugged into a [`Dispatcher`].
pub trait AdmissionPolicy: Send + 'static {
    type Entry: Send + 'static;

    fn kind(&self) -> EventKind;

    /// Decide whether `entry` still warrants a delivery. May reset `state`
    /// (e.g. when the access token changed).
    fn admit(
        &mut self,
        entry: &Self::Entry,
        state: &mut EventState,
        token: Option<&str>,
    ) -> Admission;

    fn build_payload(
        &self,
        entry: &Self::Entry,
        state: &EventState,
        config: &SdkConfig,
    ) -> TelemetryPayload;

    /// Apply a confirmed delivery. `state` is persisted afterwards.
    fn on_success(&mut self, entry: &Self::Entry, state: &mut EventState, token: Option<&str>);
}

pub struct Dispatcher<P: AdmissionPolicy> {
    shared: Arc<Shared<P>>,
}

impl<P: AdmissionPolicy> Clone for Dispatcher<P> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<P: AdmissionPolicy> {
    kind: EventKind,
    config: ConfigHandle,
    store: Arc<dyn KeyValueStore>,
    transport: Arc<dyn Transport>,
    inner: Mutex<Inner<P>>,
    /// Mirrors `Inner::in_flight` for async waiters.
    busy: watch::Sender<bool>,
}

struct Inner<P: AdmissionPolicy> {
    policy: P,
    queue: VecDeque<P::Entry>,
    in_flight: bool,
    /// Loaded from storage on first need, then kept for the process lifetime.
    event_state: Option<EventState>,
    warned: Warned,
}

/// One-shot warning latches, one per failure site.
#[derive(Debug, Default)]
struct Warned {
    read: bool,
    write: bool,
    endpoint: bool,
    runtime: bool,
}

impl<P: AdmissionPolicy> Dispatcher<P> {
    pub fn new(
        policy: P,
        config: ConfigHandle,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let (busy, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                kind: policy.kind(),
                config,
                store,
                transport,
                inner: Mutex::new(Inner {
                    policy,
                    queue: VecDeque::new(),
                    in_flight: false,
                    event_state: None,
                    warned: Warned::default(),
                }),
                busy,
            }),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.shared.kind
    }

    /// Queue `entry` if telemetry is eligible for `resources`, then dispatch.
    ///
    /// Eligible means an access token is configured and at least one
    /// resource is on a first-party HTTP host. Private-scheme locators only
    /// count once they have been rewritten onto the API origin.
    pub fn report<S: AsRef<str>>(&self, entry: P::Entry, resources: &[S]) {
        if !is_eligible(&self.shared.config.load(), resources) {
            debug!(event = self.shared.kind.event_name(), "telemetry.ineligible");
            return;
        }

        let mut inner = self.lock();
        inner.queue.push_back(entry);
        self.drain(&mut inner);
        self.publish(&inner);
    }

    /// Start the next delivery if idle. Safe to call at any time.
    pub fn dispatch(&self) {
        let mut inner = self.lock();
        self.drain(&mut inner);
        self.publish(&inner);
    }

    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn in_flight(&self) -> bool {
        self.lock().in_flight
    }

    /// Snapshot of the cached event state, if it has been loaded yet.
    pub fn event_state(&self) -> Option<EventState> {
        self.lock().event_state.clone()
    }

    /// Resolve once no delivery is in flight.
    pub async fn wait_idle(&self) {
        let mut busy = self.shared.busy.subscribe();
        // `self` keeps the sender alive, so the channel cannot close here.
        let _ = busy.wait_for(|in_flight| !*in_flight).await;
    }

    fn lock(&self) -> MutexGuard<'_, Inner<P>> {
        self.shared
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner<P>) {
        self.shared.busy.send_replace(inner.in_flight);
    }

    fn drain(&self, inner: &mut Inner<P>) {
        if inner.in_flight || inner.queue.is_empty() {
            return;
        }

        let event = self.shared.kind.event_name();
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            if !inner.warned.runtime {
                inner.warned.runtime = true;
                warn!(event, "telemetry dispatch needs a Tokio runtime; entries stay queued");
            }
            return;
        };

        let config = self.shared.config.load_full();
        let token = config.access_token();
        let Inner {
            policy,
            queue,
            in_flight,
            event_state,
            warned,
        } = inner;

        while let Some(entry) = queue.pop_front() {
            let state = event_state.get_or_insert_with(|| self.load_state(token, &mut warned.read));

            match policy.admit(&entry, state, token) {
                Admission::Send => {}
                Admission::SkipAndContinue => {
                    debug!(event, "telemetry.skip");
                    continue;
                }
                Admission::SkipAndStop => {
                    debug!(event, queued = queue.len(), "telemetry.skip_stop");
                    return;
                }
            }

            state.ensure_identity();
            let payload = policy.build_payload(&entry, state, &config);
            let request = match build_request(&payload, token, &config) {
                Ok(request) => request,
                Err(error) => {
                    if !warned.endpoint {
                        warned.endpoint = true;
                        warn!(event, %error, "telemetry endpoint is not a valid locator");
                    }
                    continue;
                }
            };

            *in_flight = true;
            let dispatcher = self.clone();
            runtime.spawn(async move {
                let result = dispatcher.shared.transport.post(request).await;
                dispatcher.complete(&entry, result);
            });
            return;
        }
    }

    fn complete(&self, entry: &P::Entry, result: Result<(), TransportError>) {
        let event = self.shared.kind.event_name();
        let mut guard = self.lock();
        let inner = &mut *guard;
        inner.in_flight = false;

        match result {
            Ok(()) => {
                debug!(event, "telemetry.delivered");
                let config = self.shared.config.load_full();
                let token = config.access_token();
                let state = inner.event_state.get_or_insert_with(EventState::default);
                inner.policy.on_success(entry, state, token);
                self.persist(state, token, &mut inner.warned.write);
                self.drain(inner);
            }
            Err(error) => {
                debug!(event, %error, "telemetry.delivery_failed");
            }
        }

        self.publish(inner);
    }

    fn load_state(&self, token: Option<&str>, warned: &mut bool) -> EventState {
        let store = &self.shared.store;
        if !store.is_available() {
            debug!(event = self.shared.kind.event_name(), "telemetry.storage_unavailable");
            return EventState::default();
        }

        let key = storage_key(&self.shared.kind.storage_namespace(), token);
        let loaded = store.get(&key).and_then(|raw| {
            raw.map(|raw| serde_json::from_str::<EventState>(&raw))
                .transpose()
                .map_err(StorageError::from)
        });

        match loaded {
            Ok(state) => state.unwrap_or_default(),
            Err(error) => {
                if !*warned {
                    *warned = true;
                    warn!(
                        event = self.shared.kind.event_name(),
                        %error,
                        "unable to read telemetry state; starting fresh"
                    );
                }
                EventState::default()
            }
        }
    }

    fn persist(&self, state: &EventState, token: Option<&str>, warned: &mut bool) {
        let store = &self.shared.store;
        if !store.is_available() {
            return;
        }

        let key = storage_key(&self.shared.kind.storage_namespace(), token);
        let saved = serde_json::to_string(state)
            .map_err(StorageError::from)
            .and_then(|json| store.set(&key, &json));

        if let Err(error) = saved
            && !*warned
        {
            *warned = true;
            warn!(
                event = self.shared.kind.event_name(),
                %error,
                "unable to persist telemetry state"
            );
        }
    }
}

fn is_eligible<S: AsRef<str>>(config: &SdkConfig, resources: &[S]) -> bool {
    config.access_token().is_some()
        && resources
            .iter()
            .map(AsRef::as_ref)
            .any(|resource| is_first_party_http(resource, config))
}
