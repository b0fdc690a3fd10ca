use crate::error::LocatorError;
use std::fmt;

/// A locator split into the pieces the rewrite rules operate on.
///
/// `params` keeps every query parameter as its raw `key=value` (or bare
/// `key`) text, in order, so formatting an untouched value reproduces the
/// input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatorParts {
    pub protocol: String,
    pub authority: String,
    pub path: String,
    pub params: Vec<String>,
}

/// Split `scheme://authority/path?query`.
///
/// The scheme must be one or more word characters followed by `://`; the
/// authority runs up to the first `/` or `?`; a missing path becomes `/`.
pub fn parse(locator: &str) -> Result<LocatorParts, LocatorError> {
    let malformed = || LocatorError::Malformed(locator.to_string());

    let (protocol, rest) = locator.split_once("://").ok_or_else(malformed)?;
    if protocol.is_empty()
        || !protocol
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(malformed());
    }

    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let (authority, rest) = rest.split_at(authority_end);

    let (path, query) = match rest.split_once('?') {
        Some((path, query)) => (path, query),
        None => (rest, ""),
    };
    let path = if path.is_empty() { "/" } else { path };

    let params = if query.is_empty() {
        Vec::new()
    } else {
        query.split('&').map(ToOwned::to_owned).collect()
    };

    Ok(LocatorParts {
        protocol: protocol.to_string(),
        authority: authority.to_string(),
        path: path.to_string(),
        params,
    })
}

/// Reassemble a locator; the `?` is omitted when there are no params.
pub fn format(parts: &LocatorParts) -> String {
    parts.to_string()
}

impl fmt::Display for LocatorParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}{}", self.protocol, self.authority, self.path)?;
        if !self.params.is_empty() {
            write!(f, "?{}", self.params.join("&"))?;
        }
        Ok(())
    }
}
