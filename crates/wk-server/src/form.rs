//! Urlencoded form decoding that keeps field values as raw bytes.
//!
//! Page bodies are arbitrary bytes, so `%FF` must arrive as the byte `0xFF`
//! rather than a UTF-8 replacement character.

use axum::http::{HeaderMap, header};
use percent_encoding::percent_decode;

/// Media type of the edit form submission.
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Whether the request declares an urlencoded form body.
pub(crate) fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

/// First value of the field `name` in an urlencoded `body`.
///
/// `+` decodes to a space and `%XX` to the byte `XX`. Malformed escapes are
/// kept literally.
pub(crate) fn field(body: &[u8], name: &str) -> Option<Vec<u8>> {
    body.split(|&b| b == b'&')
        .filter(|pair| !pair.is_empty())
        .find_map(|pair| {
            let (key, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };
            (decode(key) == name.as_bytes()).then(|| decode(value))
        })
}

fn decode(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
