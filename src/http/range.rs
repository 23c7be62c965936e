//! Range header parsing
//!
//! Single-range `bytes=` parsing per RFC 7233. Multi-range and non-byte
//! units are ignored, which downgrades the request to a full response.

/// Outcome of parsing a `Range` header against a known file size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    /// No usable Range header; serve the whole file with 200.
    Full,
    /// Serve `start..=end` with 206. Both bounds are valid indices.
    Partial { start: usize, end: usize },
    /// Range cannot be satisfied; respond 416.
    Unsatisfiable,
}

impl RangeSpec {
    /// Number of body bytes a partial response will carry.
    #[cfg(test)]
    pub fn len(self) -> Option<usize> {
        match self {
            Self::Partial { start, end } => Some(end - start + 1),
            _ => None,
        }
    }
}

/// Parse a `Range` header value against the file size.
///
/// Supported forms:
/// - `bytes=start-end`
/// - `bytes=start-` (to end of file)
/// - `bytes=-suffix` (last `suffix` bytes)
///
/// # Examples
/// ```
/// use pubserv::http::range::{parse_range_header, RangeSpec};
///
/// assert_eq!(
///     parse_range_header(Some("bytes=0-99"), 1000),
///     RangeSpec::Partial { start: 0, end: 99 }
/// );
/// assert_eq!(parse_range_header(None, 1000), RangeSpec::Full);
/// ```
pub fn parse_range_header(header: Option<&str>, file_size: usize) -> RangeSpec {
    let Some(value) = header else {
        return RangeSpec::Full;
    };
    let Some(spec) = value.strip_prefix("bytes=") else {
        return RangeSpec::Full;
    };
    // Multi-range responses need multipart bodies; serve the whole file instead.
    if spec.contains(',') {
        return RangeSpec::Full;
    }
    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeSpec::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if file_size == 0 {
        return RangeSpec::Unsatisfiable;
    }

    if start_str.is_empty() {
        return parse_suffix(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeSpec::Full;
    };
    if start >= file_size {
        return RangeSpec::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeSpec::Full;
        };
        // last-byte-pos < first-byte-pos is a syntactically invalid
        // byte-range-spec (RFC 7233); ignore it and serve the whole file.
        if end < start {
            return RangeSpec::Full;
        }
        end.min(file_size - 1)
    };

    RangeSpec::Partial { start, end }
}

/// Parse a suffix range such as `-500` (the last 500 bytes).
fn parse_suffix(suffix: &str, file_size: usize) -> RangeSpec {
    let Ok(count) = suffix.parse::<usize>() else {
        return RangeSpec::Full;
    };
    if count == 0 {
        return RangeSpec::Unsatisfiable;
    }
    RangeSpec::Partial {
        start: file_size.saturating_sub(count),
        end: file_size - 1,
    }
}
