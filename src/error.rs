//! Error types, one enum per subsystem.
//!
//! Locator and config errors are surfaced to the integrator. Storage and
//! transport errors only ever reach the telemetry dispatcher, which absorbs
//! them; they are public so custom `KeyValueStore` / `Transport`
//! implementations can produce them.

use thiserror::Error;

// ─── Locator errors ─────────────────────────────────────────────────────────

const TOKEN_HELP: &str = "See the access-token section of the API documentation";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocatorError {
    #[error("unable to parse locator: {0}")]
    Malformed(String),

    #[error("an API access token is required to use first-party resources. {TOKEN_HELP}")]
    MissingToken,

    #[error(
        "use a public access token (pk.*), not a secret access token (sk.*). {TOKEN_HELP}"
    )]
    SecretTokenUsed,
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    Load(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── Storage errors ─────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend not available: {0}")]
    Unavailable(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ─── Transport errors ───────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}
