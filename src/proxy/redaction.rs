//! Display-safe rendering of URIs that may embed credentials
//!
//! Redaction never fails: anything that cannot be rebuilt as a hierarchical
//! `scheme://` URL has its whole authority masked instead.

use crate::proxy::types::MASK;
use url::Url;

/// Redact the password of a raw URI string
///
/// The username is preserved, a non-empty password is replaced by [`MASK`].
/// Redacting an already redacted value returns it unchanged.
pub fn redact_uri(raw: &str) -> String {
    let (scheme, rest) = split_scheme(raw);
    if leading_authority(rest) == MASK {
        return raw.to_string();
    }
    if scheme.is_empty() {
        return mask_authority(raw);
    }

    match Url::parse(raw) {
        Ok(url) if !url.cannot_be_a_base() => redact_url(&url),
        _ => mask_authority(raw),
    }
}

/// Redact the password of an already parsed URL
pub fn redact_url(url: &Url) -> String {
    if !url.password().is_some_and(|password| !password.is_empty()) {
        return url.to_string();
    }

    let mut redacted = url.clone();
    match redacted.set_password(Some(MASK)) {
        Ok(()) => redacted.to_string(),
        Err(()) => mask_authority(url.as_str()),
    }
}

/// Split off a leading `scheme://`, or nothing when the input has none
fn split_scheme(raw: &str) -> (&str, &str) {
    match raw.find("://") {
        Some(index) if is_scheme(&raw[..index]) => raw.split_at(index + 3),
        _ => ("", raw),
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." )`
fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|first| first.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn leading_authority(rest: &str) -> &str {
    rest.split(['/', '?', '#']).next().unwrap_or(rest)
}

/// Replace the authority segment with [`MASK`]
///
/// The authority runs from the end of a valid `scheme://` (or the start of
/// the input) past the last `@`, up to the first `/`, `?` or `#`.
fn mask_authority(raw: &str) -> String {
    let (scheme, rest) = split_scheme(raw);

    let host_start = rest.rfind('@').map_or(0, |at| at + 1);
    let authority_end = rest[host_start..]
        .find(|c: char| matches!(c, '/' | '?' | '#'))
        .map_or(rest.len(), |offset| host_start + offset);

    format!("{scheme}{MASK}{}", &rest[authority_end..])
}
