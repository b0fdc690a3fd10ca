use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Origin every first-party locator is rewritten onto. A non-root path
    /// is prefixed to rewritten paths.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    pub access_token: Option<String>,

    #[serde(default = "default_true")]
    pub require_access_token: bool,

    /// Private addressing scheme, without the trailing `:`.
    #[serde(default = "default_first_party_scheme")]
    pub first_party_scheme: String,

    #[serde(default = "default_first_party_domains")]
    pub first_party_domains: Vec<String>,

    /// Billing token forwarded with resource-load events.
    #[serde(default)]
    pub sku_token: Option<String>,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

fn default_api_url() -> String {
    "https://api.example-mapservice.com".into()
}

fn default_true() -> bool {
    true
}

fn default_first_party_scheme() -> String {
    "mapservice".into()
}

fn default_first_party_domains() -> Vec<String> {
    vec![
        "example-mapservice.com".into(),
        "example-mapservice.cn".into(),
    ]
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            api_url: default_api_url(),
            access_token: None,
            require_access_token: true,
            first_party_scheme: default_first_party_scheme(),
            first_party_domains: default_first_party_domains(),
            sku_token: None,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl SdkConfig {
    /// The configured access token, treating an empty string as unset.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}

// ── Telemetry ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_events_url")]
    pub events_url: String,
    #[serde(default = "default_sdk_identifier")]
    pub sdk_identifier: String,
    #[serde(default = "default_sdk_version")]
    pub sdk_version: String,
    /// JSON document backing `FileStore`. `~` is expanded.
    #[serde(default)]
    pub state_path: Option<String>,
}

fn default_events_url() -> String {
    "https://events.example-mapservice.com/events/v2".into()
}

fn default_sdk_identifier() -> String {
    "cartolink".into()
}

fn default_sdk_version() -> String {
    env!("CARGO_PKG_VERSION").into()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            events_url: default_events_url(),
            sdk_identifier: default_sdk_identifier(),
            sdk_version: default_sdk_version(),
            state_path: None,
        }
    }
}

impl TelemetryConfig {
    pub fn resolved_state_path(&self) -> Option<PathBuf> {
        self.state_path
            .as_deref()
            .map(|raw| PathBuf::from(shellexpand::tilde(raw).into_owned()))
    }
}

// ── Device capabilities ───────────────────────────────────────────

/// Display characteristics that influence which tile variant is requested.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceProfile {
    pub pixel_ratio: f64,
    pub supports_webp: bool,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            pixel_ratio: 1.0,
            supports_webp: false,
        }
    }
}
