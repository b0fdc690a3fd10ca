use super::origin::is_first_party_http;
use super::parts::parse;
use crate::config::SdkConfig;

/// Collapse a concrete first-party tile locator back into its
/// `<scheme>://tiles/...` form, the shape stored in serialized styles.
///
/// Drops the origin, the `/v4/` prefix, any `@2x` density suffix and the
/// `access_token` param. Locators that are not first-party `/v4/` tiles with
/// a file extension come back unchanged.
pub fn canonicalize_tile_locator(tile: &str, config: &SdkConfig) -> String {
    if !is_first_party_http(tile, config) {
        return tile.to_string();
    }
    let Ok(parts) = parse(tile) else {
        return tile.to_string();
    };
    let Some(rest) = parts.path.strip_prefix("/v4/") else {
        return tile.to_string();
    };
    let Some(dot) = rest.rfind('.').filter(|&dot| !rest[dot..].contains('/')) else {
        return tile.to_string();
    };

    let (stem, extension) = rest.split_at(dot);
    let stem = stem.strip_suffix("@2x").unwrap_or(stem);

    let params: Vec<&str> = parts
        .params
        .iter()
        .map(String::as_str)
        .filter(|param| !param.starts_with("access_token="))
        .collect();

    let mut canonical = format!(
        "{}://tiles/{stem}{extension}",
        config.first_party_scheme
    );
    if !params.is_empty() {
        canonical.push('?');
        canonical.push_str(&params.join("&"));
    }
    canonical
}
