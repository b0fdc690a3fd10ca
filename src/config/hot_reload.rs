use arc_swap::ArcSwap;
use std::sync::Arc;

use super::SdkConfig;

/// Live-swappable SDK configuration.
///
/// Wraps `SdkConfig` in an `ArcSwap` so readers (locator rewrites, the
/// telemetry dispatchers) never block and writers atomically swap the
/// pointer. Rotating the access token goes through here.
#[derive(Clone)]
pub struct ConfigHandle {
    inner: Arc<ArcSwap<SdkConfig>>,
}

impl ConfigHandle {
    /// Create a new handle seeded with `config`.
    pub fn new(config: SdkConfig) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(config)),
        }
    }

    /// Load current config snapshot. Lock-free.
    pub fn load(&self) -> arc_swap::Guard<Arc<SdkConfig>> {
        self.inner.load()
    }

    /// Return a clone of the current `Arc<SdkConfig>`.
    pub fn load_full(&self) -> Arc<SdkConfig> {
        self.inner.load_full()
    }

    /// Manually swap in a new config (e.g. after programmatic mutation).
    pub fn store(&self, config: SdkConfig) {
        self.inner.store(Arc::new(config));
    }

    /// Swap in a copy of the current config carrying `token`.
    pub fn set_access_token(&self, token: Option<String>) {
        self.inner.rcu(|current| {
            let mut next = SdkConfig::clone(current);
            next.access_token.clone_from(&token);
            next
        });
    }
}
