use crate::config::SdkConfig;

/// Whether `locator` uses the SDK's private addressing scheme.
pub fn is_first_party(locator: &str, config: &SdkConfig) -> bool {
    locator
        .strip_prefix(config.first_party_scheme.as_str())
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Whether `locator` points at a first-party HTTP(S) host.
///
/// Accepts an optional `http:`/`https:` scheme (or a protocol-relative
/// `//`), any subdomain, and a host ending in one of the configured
/// first-party domains, followed by `/`, `?` or the end of the input.
/// Matching is ASCII case-insensitive.
pub fn is_first_party_http(locator: &str, config: &SdkConfig) -> bool {
    let lowered = locator.to_ascii_lowercase();
    let rest = ["https://", "http://", "//"]
        .iter()
        .find_map(|prefix| lowered.strip_prefix(prefix))
        .unwrap_or(&lowered);

    // The host pattern cannot cross a `/`, so only the first segment matters.
    let segment = rest.split('/').next().unwrap_or_default();

    config
        .first_party_domains
        .iter()
        .map(|domain| domain.to_ascii_lowercase())
        .any(|domain| segment_ends_in_domain(segment, &domain))
}

fn segment_ends_in_domain(segment: &str, domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    segment.match_indices(domain).any(|(start, _)| {
        let before = &segment[..start];
        let after = &segment[start + domain.len()..];
        (before.is_empty() || before.ends_with('.')) && (after.is_empty() || after.starts_with('?'))
    })
}
