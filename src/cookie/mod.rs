//! Browser-style cookie handling: wire-format helpers and the jar
//! abstraction the basket persists through.

mod file_jar;
mod jar;

pub use file_jar::FileJar;
pub use jar::{CookieJar, MemoryJar, StoredCookie};

use percent_encoding::percent_decode_str;

/// Find `name` in a `Cookie:`-style header string and return its decoded value.
///
/// Scans `;`-separated pairs and returns the percent-decoded value of the
/// first key match. Malformed pairs are skipped; absence is `None`, never
/// an error.
pub fn read_cookie(header: &str, name: &str) -> Option<String> {
    if header.is_empty() {
        return None;
    }
    for pair in header.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key == name {
            return Some(percent_decode_str(value).decode_utf8_lossy().into_owned());
        }
    }
    None
}

/// Render a `Set-Cookie`-style string of the form `name=value;Max-Age=n`.
///
/// `name` is not escaped; callers pass JSON-stringified values, which are
/// safe as-is.
pub fn write_cookie(name: &str, value: &str, max_age_secs: u64) -> String {
    format!("{name}={value};Max-Age={max_age_secs}")
}
