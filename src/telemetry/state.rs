use super::identity;
use serde::{Deserialize, Serialize};

/// Durable per-event-type delivery state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_id: Option<String>,
    /// Epoch millis of the last confirmed delivery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success: Option<i64>,
    /// Access token in effect at the last confirmed delivery.
    #[serde(
        default,
        rename = "accessToken",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_access_token: Option<String>,
}

impl EventState {
    pub fn has_valid_identity(&self) -> bool {
        self.anonymous_id.as_deref().is_some_and(identity::is_valid)
    }

    /// Replace an absent or malformed anonymous id. Returns `true` when a new
    /// id was generated.
    pub fn ensure_identity(&mut self) -> bool {
        if self.has_valid_identity() {
            return false;
        }
        self.anonymous_id = Some(identity::generate());
        true
    }
}

/// `"<namespace>:<token>"`, with an empty token segment when none is set.
pub fn storage_key(namespace: &str, token: Option<&str>) -> String {
    format!("{namespace}:{}", token.unwrap_or_default())
}
