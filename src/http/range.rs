//! HTTP Range header parsing (RFC 7233, single `bytes` ranges)
//!
//! Ranges are sliced out of the in-memory cache at response time; the
//! parser only validates and clamps positions against the cached size.

/// A byte range resolved against a known file size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte position (inclusive)
    pub start: usize,
    /// Last byte position (inclusive); `None` means to the end of the file
    pub end: Option<usize>,
}

impl ByteRange {
    /// Resolve the inclusive end position for a file of `size` bytes
    #[inline]
    pub fn end_position(&self, size: usize) -> usize {
        self.end.unwrap_or_else(|| size.saturating_sub(1))
    }

    /// Number of bytes the range selects
    #[cfg(test)]
    pub fn len(&self, size: usize) -> usize {
        self.end_position(size).saturating_sub(self.start) + 1
    }
}

/// Outcome of parsing a Range header
#[derive(Debug)]
pub enum RangeOutcome {
    /// Well-formed, satisfiable range
    Valid(ByteRange),
    /// Start lies beyond the file; respond 416
    NotSatisfiable,
    /// No header, non-bytes unit, multi-range or malformed; serve the full body
    Full,
}

/// Parse a Range header value against a file size
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Multi-range requests and non-`bytes` units are ignored rather than
/// rejected, falling back to a full response.
pub fn parse_range(header: Option<&str>, size: usize) -> RangeOutcome {
    let Some(header) = header else {
        return RangeOutcome::Full;
    };
    let Some(spec) = header.strip_prefix("bytes=") else {
        return RangeOutcome::Full;
    };
    if spec.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = spec.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        // Suffix form: "-500" selects the final 500 bytes. There is
        // nothing to select from an empty file, so a suffix against
        // size zero is unsatisfiable, not a zero-length slice.
        let Ok(suffix) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if suffix == 0 || size == 0 {
            return RangeOutcome::NotSatisfiable;
        }
        return RangeOutcome::Valid(ByteRange {
            start: size.saturating_sub(suffix),
            end: Some(size.saturating_sub(1)),
        });
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= size {
        return RangeOutcome::NotSatisfiable;
    }

    let end = if end_str.is_empty() {
        None
    } else {
        let Ok(e) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if e < start {
            return RangeOutcome::NotSatisfiable;
        }
        Some(e.min(size - 1))
    };

    RangeOutcome::Valid(ByteRange { start, end })
}
