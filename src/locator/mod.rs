//! Locator normalization for first-party API resources.
//!
//! The free functions are pure over an `SdkConfig` snapshot. [`Normalizer`]
//! binds them to a live [`ConfigHandle`] and a [`DeviceProfile`] for
//! integrators.

pub mod api;
pub mod canonical;
pub mod origin;
pub mod parts;
pub mod resources;

pub use api::{is_secret_token, to_api_locator};
pub use canonical::canonicalize_tile_locator;
pub use origin::{is_first_party, is_first_party_http};
pub use parts::{LocatorParts, format, parse};
pub use resources::{glyphs_locator, source_locator, sprite_locator, style_locator, tile_locator};

use crate::config::{ConfigHandle, DeviceProfile};
use crate::error::LocatorError;

#[derive(Clone)]
pub struct Normalizer {
    config: ConfigHandle,
    device: DeviceProfile,
}

impl Normalizer {
    pub fn new(config: ConfigHandle, device: DeviceProfile) -> Self {
        Self { config, device }
    }

    pub fn normalize_style_locator(
        &self,
        locator: &str,
        token: Option<&str>,
    ) -> Result<String, LocatorError> {
        style_locator(locator, token, &self.config.load())
    }

    pub fn normalize_glyphs_locator(
        &self,
        locator: &str,
        token: Option<&str>,
    ) -> Result<String, LocatorError> {
        glyphs_locator(locator, token, &self.config.load())
    }

    pub fn normalize_source_locator(
        &self,
        locator: &str,
        token: Option<&str>,
    ) -> Result<String, LocatorError> {
        source_locator(locator, token, &self.config.load())
    }

    pub fn normalize_sprite_locator(
        &self,
        locator: &str,
        format: &str,
        extension: &str,
        token: Option<&str>,
    ) -> Result<String, LocatorError> {
        sprite_locator(locator, format, extension, token, &self.config.load())
    }

    pub fn normalize_tile_locator(
        &self,
        tile: &str,
        source: Option<&str>,
        tile_size: Option<u32>,
    ) -> Result<String, LocatorError> {
        tile_locator(tile, source, tile_size, self.device, &self.config.load())
    }

    pub fn canonicalize_tile_locator(&self, tile: &str) -> String {
        canonicalize_tile_locator(tile, &self.config.load())
    }
}
