mod env_overrides;
mod hot_reload;
mod loader;
mod types;

pub use hot_reload::ConfigHandle;
pub use types::{DeviceProfile, SdkConfig, TelemetryConfig};
