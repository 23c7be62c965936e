//! Conditional request support
//!
//! Weak `ETag` generation from file metadata plus `If-None-Match` and
//! `If-Modified-Since` evaluation, the validator set a stock static file
//! middleware sends by default.

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Generate a weak `ETag` from file size and modification time.
///
/// The validator changes whenever the file is rewritten, which is all a
/// static file server needs; hashing the content would cost a full pass
/// over every response body.
pub fn generate_etag(len: u64, modified: Option<SystemTime>) -> String {
    let mtime_ms = modified
        .and_then(|t| t.duration_since(SystemTime::UNIX_EPOCH).ok())
        .map_or(0, |d| d.as_millis());
    format!("W/\"{len:x}-{mtime_ms:x}\"")
}

/// Check whether the client's `If-None-Match` header matches `etag`.
///
/// Handles single values, comma-separated lists and the `*` wildcard.
/// Weak comparison: a `W/` prefix on either side is ignored.
pub fn etag_matches(if_none_match: Option<&str>, etag: &str) -> bool {
    let Some(header) = if_none_match else {
        return false;
    };
    let own = etag.trim_start_matches("W/");
    header.split(',').any(|candidate| {
        let candidate = candidate.trim();
        candidate == "*" || candidate.trim_start_matches("W/") == own
    })
}

/// Check whether the file is unmodified relative to `If-Modified-Since`.
///
/// Returns true (send 304) when the file's mtime is at or before the
/// client's date. Unparseable dates are ignored, per RFC 7232.
pub fn unmodified_since(if_modified_since: Option<&str>, modified: Option<SystemTime>) -> bool {
    let (Some(header), Some(modified)) = (if_modified_since, modified) else {
        return false;
    };
    let Ok(client_time) = DateTime::parse_from_rfc2822(header) else {
        return false;
    };
    let file_time: DateTime<Utc> = modified.into();
    // HTTP dates have second precision; drop sub-second mtime noise.
    file_time.timestamp() <= client_time.timestamp()
}

/// Format a modification time as an RFC 7231 http-date for `Last-Modified`.
pub fn http_date(modified: SystemTime) -> String {
    let time: DateTime<Utc> = modified.into();
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
