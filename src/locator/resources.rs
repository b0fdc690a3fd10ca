//! Per-resource rewrite rules for first-party locators.
//!
//! Every wrapper leaves third-party locators alone (sprites only get their
//! file suffix) and otherwise maps the private scheme onto the API path
//! layout before handing off to [`to_api_locator`].

use super::api::to_api_locator;
use super::origin::is_first_party;
use super::parts::parse;
use crate::config::{DeviceProfile, SdkConfig};
use crate::error::LocatorError;

/// Tile size that forces the high-density variant.
const HIDPI_TILE_SIZE: u32 = 512;

pub fn style_locator(
    locator: &str,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    if !is_first_party(locator, config) {
        return Ok(locator.to_string());
    }
    let mut parts = parse(locator)?;
    parts.path = format!("/styles/v1{}", parts.path);
    to_api_locator(parts, token, config)
}

pub fn glyphs_locator(
    locator: &str,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    if !is_first_party(locator, config) {
        return Ok(locator.to_string());
    }
    let mut parts = parse(locator)?;
    parts.path = format!("/fonts/v1{}", parts.path);
    to_api_locator(parts, token, config)
}

/// Tileset descriptors live at `/v4/<tileset ids>.json`. `secure` asks the
/// API to emit HTTPS tile locators inside the descriptor.
pub fn source_locator(
    locator: &str,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    if !is_first_party(locator, config) {
        return Ok(locator.to_string());
    }
    let mut parts = parse(locator)?;
    parts.path = format!("/v4/{}.json", parts.authority);
    parts.params.push("secure".into());
    to_api_locator(parts, token, config)
}

/// `format` is the density suffix (`""` or `"@2x"`), `extension` the file
/// type (`".json"` or `".png"`).
pub fn sprite_locator(
    locator: &str,
    format: &str,
    extension: &str,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    let mut parts = parse(locator)?;
    if !is_first_party(locator, config) {
        parts.path.push_str(format);
        parts.path.push_str(extension);
        return Ok(parts.to_string());
    }
    parts.path = format!("/styles/v1{}/sprite{format}{extension}", parts.path);
    to_api_locator(parts, token, config)
}

/// Pick the tile variant the device should request.
///
/// Only applies when the tile came from a first-party `source`; the tile
/// locator itself is already an absolute API locator, so its origin is
/// kept and only its file name and placeholder token are touched.
pub fn tile_locator(
    tile: &str,
    source: Option<&str>,
    tile_size: Option<u32>,
    device: DeviceProfile,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    if !source.is_some_and(|source| is_first_party(source, config)) {
        return Ok(tile.to_string());
    }

    let mut parts = parse(tile)?;

    if let Some((stem, extension)) = split_image_extension(&parts.path) {
        let suffix = if device.pixel_ratio >= 2.0 || tile_size == Some(HIDPI_TILE_SIZE) {
            "@2x"
        } else {
            ""
        };
        let extension = if device.supports_webp {
            ".webp"
        } else {
            extension
        };
        parts.path = format!("{stem}{suffix}{extension}");
    }

    replace_temporary_token(&mut parts.params, config.access_token().unwrap_or_default());
    Ok(parts.to_string())
}

/// Split a trailing `.png`/`.jpg` extension (optionally followed by a
/// palette depth such as `.png32`) off `path`.
pub(super) fn split_image_extension(path: &str) -> Option<(&str, &str)> {
    let dot = path.rfind('.')?;
    let extension = &path[dot..];
    let depth = extension
        .strip_prefix(".png")
        .or_else(|| extension.strip_prefix(".jpg"))?;
    depth
        .chars()
        .all(|c| c.is_ascii_digit())
        .then(|| (&path[..dot], extension))
}

/// Tileset descriptors may embed short-lived `tk.*` tokens; swap them for the
/// integrator's own token.
fn replace_temporary_token(params: &mut [String], token: &str) {
    for param in params
        .iter_mut()
        .filter(|param| param.starts_with("access_token=tk."))
    {
        *param = format!("access_token={token}");
    }
}
