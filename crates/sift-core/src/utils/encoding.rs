//! Percent-encoding helpers for package names and route segments.
//!
//! The registry addresses scoped packages as `@scope%2Fname`: only the
//! separating slash is escaped. Unscoped names go through ordinary URI
//! component encoding.

use std::borrow::Cow;

/// Characters that URI component encoding leaves alone but `urlencoding` escapes
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Encode package name for a registry URL path segment
pub fn encode_package_name(name: &str) -> String {
    if name.starts_with('@') {
        // Scoped package: @org/pkg -> @org%2Fpkg
        name.replacen('/', "%2F", 1)
    } else {
        encode_uri_component(name)
    }
}

/// URI component encoding: everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )` is escaped
pub fn encode_uri_component(input: &str) -> String {
    let mut encoded = urlencoding::encode(input).into_owned();
    if encoded.contains('%') {
        for (escaped, mark) in UNRESERVED_MARKS {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}

/// Percent-decode a single route segment.
///
/// Malformed escapes and escapes that decode to invalid UTF-8 leave the
/// segment untouched.
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    if !segment.contains('%') || has_malformed_escape(segment) {
        return Cow::Borrowed(segment);
    }

    match urlencoding::decode(segment) {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(segment),
    }
}

fn has_malformed_escape(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}
