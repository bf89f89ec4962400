//! `Link` header handling for Okta cursor pagination.
//!
//! Okta list endpoints return the next page as
//! `Link: <https://org.okta.com/api/v1/users?after=00u1&limit=200>; rel="next"`,
//! sometimes alongside a `rel="self"` entry in the same or a separate header.

use reqwest::header::{HeaderMap, LINK};

/// Extract the `rel="next"` URL from all `Link` headers, if any.
pub fn next_link(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(parse_next)
}

fn parse_next(header: &str) -> Option<String> {
    header.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|param| {
            let param = param.trim();
            param == "rel=\"next\"" || param == "rel=next"
        });
        if !is_next {
            return None;
        }
        target
            .strip_prefix('<')
            .and_then(|t| t.strip_suffix('>'))
            .map(str::to_string)
    })
}
