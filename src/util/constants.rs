// logreach - util/constants.rs
//
// Single source of truth for all named constants and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "logreach";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Timestamp format
// =============================================================================

/// The fixed timestamp format carried at the head of every ordered log line.
///
/// Fixed-width and zero-padded, so lexical comparison of raw timestamp
/// strings is equivalent to chronological comparison. Window bounds, file
/// classification, and line filtering all compare in this lexical form.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Width in bytes of a timestamp in `TIMESTAMP_FORMAT`.
pub const TIMESTAMP_WIDTH: usize = 19;

/// Byte offset of the timestamp in lines that carry a two-character
/// severity marker before it. Together with offset zero these are the only
/// two layouts in which a line can hold its timestamp; both offsets are
/// exact contracts, not heuristics.
pub const PREFIXED_TIMESTAMP_OFFSET: usize = 2;

// =============================================================================
// External search utility
// =============================================================================

/// Line-oriented search program for plain-text files.
pub const SEARCH_PROGRAM: &str = "grep";

/// Decompressing search variant for gzip-compressed rotations.
pub const COMPRESSED_SEARCH_PROGRAM: &str = "zgrep";

// =============================================================================
// Known-exception paths
// =============================================================================

/// Path pattern for a maintenance agent log that is expected to be absent
/// on some deployments. Input paths matching this pattern are skipped
/// silently when missing instead of being reported.
pub const TOLERATED_MISSING_PATTERN: &str = r"controller-1_(.+)/var/log/mtcAgent.log";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";
