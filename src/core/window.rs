// logreach - core/window.rs
//
// The requested time window and the fixed timestamp-format contract.
// Core layer: pure logic, no I/O.

use crate::util::constants;
use chrono::NaiveDateTime;

/// Time window bounds in `YYYY-MM-DDTHH:MM:SS` lexical form.
///
/// The format is fixed-width and zero-padded, so the bounds compare
/// lexically exactly as they compare chronologically. The window is open
/// on both ends: a timestamp equal to either bound is outside it.
///
/// `start <= end` is the caller's responsibility and is not validated.
#[derive(Debug, Clone)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Strict containment: `start < stamp < end`, compared lexically.
    pub fn contains(&self, stamp: &str) -> bool {
        self.start.as_str() < stamp && stamp < self.end.as_str()
    }
}

/// Returns true if `value` is a complete timestamp in the fixed format.
pub fn is_valid_stamp(value: &str) -> bool {
    NaiveDateTime::parse_from_str(value, constants::TIMESTAMP_FORMAT).is_ok()
}

/// Candidate timestamp substring of `line` starting at byte `offset`.
///
/// Returns `None` when the line is too short or the range does not fall on
/// UTF-8 boundaries; callers treat that the same as a failed parse.
pub fn stamp_at(line: &str, offset: usize) -> Option<&str> {
    line.get(offset..offset + constants::TIMESTAMP_WIDTH)
}
