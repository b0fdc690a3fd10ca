use super::parts::{LocatorParts, parse};
use crate::config::SdkConfig;
use crate::error::LocatorError;

/// Whether `token` belongs to the secret token class (`sk.*`).
pub fn is_secret_token(token: &str) -> bool {
    token.starts_with('s')
}

/// Re-home `parts` onto the configured API origin.
///
/// An explicit `token` wins over the configured one. The token is only
/// appended when the SDK requires authentication, but a secret token is
/// rejected either way.
pub fn to_api_locator(
    mut parts: LocatorParts,
    token: Option<&str>,
    config: &SdkConfig,
) -> Result<String, LocatorError> {
    let api = parse(&config.api_url)?;
    parts.protocol = api.protocol;
    parts.authority = api.authority;
    if api.path != "/" {
        parts.path = format!("{}{}", api.path.trim_end_matches('/'), parts.path);
    }

    let token = token
        .filter(|t| !t.is_empty())
        .or_else(|| config.access_token());

    if token.is_some_and(is_secret_token) {
        return Err(LocatorError::SecretTokenUsed);
    }
    if !config.require_access_token {
        return Ok(parts.to_string());
    }

    let token = token.ok_or(LocatorError::MissingToken)?;
    parts.params.push(format!("access_token={token}"));
    Ok(parts.to_string())
}
