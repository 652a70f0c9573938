// logreach - core/rotation.rs
//
// Time-bounded walk across a log file's rotation chain.
//
// Architecture note: this module reads only the *first line* of each chain
// member to position the file against the window; matching content is
// produced by the external search utility (core::search) and filtered by
// core::filter. First-line reads are short-lived scoped acquisitions,
// released before the search is spawned.

use crate::core::filter;
use crate::core::search::{self, SearchStream};
use crate::core::window::{self, TimeWindow};
use crate::util::constants;
use crate::util::error::{ExtractError, Result};
use flate2::read::GzDecoder;
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Per-file disposition, decided from the file's first timestamp relative
/// to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDecision {
    /// Search this file, then stop: strictly older rotations cannot reach
    /// into the window.
    StopAfterCurrent,
    /// Search this file and keep walking to older rotations.
    SearchAndContinue,
    /// Skip this file but keep walking to older rotations.
    SkipAndContinue,
}

/// Position `path` against the window by its first line's leading timestamp.
///
/// A first line without a parseable timestamp leaves the file unordered:
/// it is searched and the walk continues, since older files cannot be
/// proven out of range. A first timestamp equal to either bound skips the
/// file while continuing the walk, matching the open-interval window.
pub fn classify(window: &TimeWindow, path: &Path, compressed: bool) -> Result<RotationDecision> {
    let line = first_line(path, compressed)?;

    let stamp = match window::stamp_at(&line, 0) {
        Some(s) if window::is_valid_stamp(s) => s,
        _ => return Ok(RotationDecision::SearchAndContinue),
    };

    if stamp < window.start.as_str() {
        // The file starts before the window; its tail may still reach in,
        // but everything older is entirely out of range.
        Ok(RotationDecision::StopAfterCurrent)
    } else if window.contains(stamp) {
        Ok(RotationDecision::SearchAndContinue)
    } else {
        Ok(RotationDecision::SkipAndContinue)
    }
}

/// Read the first line of `path`, decompressing on the fly for gzip
/// members. Read failures beyond the existence check propagate.
fn first_line(path: &Path, compressed: bool) -> Result<String> {
    let io_err = |source| ExtractError::Io {
        path: path.to_path_buf(),
        operation: "read first line",
        source,
    };

    let file = File::open(path).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        operation: "open",
        source: e,
    })?;

    let mut line = String::new();
    if compressed {
        BufReader::new(GzDecoder::new(file))
            .read_line(&mut line)
            .map_err(io_err)?;
    } else {
        BufReader::new(file).read_line(&mut line).map_err(io_err)?;
    }
    Ok(line)
}

/// Drives the chain `base → base.1 → ... → base.N → base.N+1.gz → ...` for
/// one input path, collecting window-filtered matches.
pub struct RotationWalker<'a> {
    window: &'a TimeWindow,
    pattern: String,
}

impl<'a> RotationWalker<'a> {
    pub fn new(window: &'a TimeWindow, patterns: &[String]) -> Self {
        Self {
            window,
            pattern: search::alternation(patterns),
        }
    }

    /// Walk one base path's rotation chain, appending matches to `results`.
    ///
    /// A missing base path is a per-path condition: logged (or silently
    /// tolerated for the known-absent agent log) and the walk ends without
    /// contributing lines. Read and spawn failures propagate.
    pub fn walk(&self, base: &Path, results: &mut Vec<String>) -> Result<()> {
        if !base.exists() {
            if is_tolerated_missing(base) {
                tracing::debug!(path = %base.display(), "Expected-absent log missing, skipping");
            } else {
                let err = ExtractError::FileNotFound {
                    path: base.to_path_buf(),
                };
                tracing::error!(error = %err, "Skipping input path");
            }
            return Ok(());
        }

        if !self.visit(base, false, results)? {
            return Ok(());
        }

        // The uncompressed rotations and the compressed tail share a single
        // rotation index.
        let mut n = 1u32;
        loop {
            let rotated = rotated_path(base, n, false);
            if !rotated.exists() {
                break;
            }
            if !self.visit(&rotated, false, results)? {
                return Ok(());
            }
            n += 1;
        }
        loop {
            let rotated = rotated_path(base, n, true);
            if !rotated.exists() {
                break;
            }
            if !self.visit(&rotated, true, results)? {
                return Ok(());
            }
            n += 1;
        }
        Ok(())
    }

    /// Classify one chain member, search it unless skipped, and report
    /// whether the walk should continue to older rotations.
    fn visit(&self, path: &Path, compressed: bool, results: &mut Vec<String>) -> Result<bool> {
        let decision = classify(self.window, path, compressed)?;
        tracing::debug!(path = %path.display(), ?decision, "Chain member classified");

        if decision != RotationDecision::SkipAndContinue {
            let before = results.len();
            let stream = SearchStream::spawn(path, &self.pattern, compressed)?;
            filter::filter_lines(self.window, stream, results).map_err(|e| ExtractError::Io {
                path: path.to_path_buf(),
                operation: "read search output",
                source: e,
            })?;
            tracing::debug!(
                path = %path.display(),
                matched = results.len() - before,
                "Search complete"
            );
        }

        Ok(decision != RotationDecision::StopAfterCurrent)
    }
}

/// `base.{n}` or `base.{n}.gz`; the rotation suffix attaches after any
/// existing extension.
fn rotated_path(base: &Path, n: u32, compressed: bool) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    if compressed {
        name.push(format!(".{n}.gz"));
    } else {
        name.push(format!(".{n}"));
    }
    PathBuf::from(name)
}

/// Paths matching this pattern are expected to be absent on some
/// deployments and are skipped without an error.
fn is_tolerated_missing(path: &Path) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN
        .get_or_init(|| Regex::new(constants::TOLERATED_MISSING_PATTERN).expect("pattern is valid"));
    re.is_match(&path.to_string_lossy())
}

/// Search `files` and their rotation chains for lines matching any of
/// `patterns` whose embedded timestamp lies strictly inside `window`.
///
/// Each base path is processed independently; missing paths are logged and
/// skipped. The combined result is sorted lexically, which is chronological
/// order because every timestamped line leads with the fixed-width stamp.
pub fn substring(
    window: &TimeWindow,
    patterns: &[String],
    files: &[PathBuf],
) -> Result<Vec<String>> {
    let walker = RotationWalker::new(window, patterns);
    let mut results = Vec::new();
    for file in files {
        walker.walk(file, &mut results)?;
    }
    results.sort_unstable();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::fs;
    use std::io::Write;

    fn window() -> TimeWindow {
        TimeWindow::new("2023-01-01T00:00:00", "2023-01-02T00:00:00")
    }

    fn plain(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).expect("write fixture");
        path
    }

    fn gzipped(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let file = fs::File::create(&path).expect("create gz fixture");
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(content.as_bytes()).expect("write gz");
        encoder.finish().expect("finish gz");
        path
    }

    #[test]
    fn test_classify_first_stamp_before_start() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = plain(dir.path(), "a.log", "2022-06-01T10:00:00 old entry\n");
        assert_eq!(
            classify(&window(), &path, false).unwrap(),
            RotationDecision::StopAfterCurrent
        );
    }

    #[test]
    fn test_classify_first_stamp_inside_window() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = plain(dir.path(), "a.log", "2023-01-01T12:00:00 entry\n");
        assert_eq!(
            classify(&window(), &path, false).unwrap(),
            RotationDecision::SearchAndContinue
        );
    }

    #[test]
    fn test_classify_first_stamp_after_end() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = plain(dir.path(), "a.log", "2023-06-01T00:00:00 recent entry\n");
        assert_eq!(
            classify(&window(), &path, false).unwrap(),
            RotationDecision::SkipAndContinue
        );
    }

    /// A first timestamp exactly on a bound is outside the open window:
    /// the file is skipped but the walk continues.
    #[test]
    fn test_classify_first_stamp_on_bound_skips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let at_start = plain(dir.path(), "s.log", "2023-01-01T00:00:00 entry\n");
        let at_end = plain(dir.path(), "e.log", "2023-01-02T00:00:00 entry\n");
        assert_eq!(
            classify(&window(), &at_start, false).unwrap(),
            RotationDecision::SkipAndContinue
        );
        assert_eq!(
            classify(&window(), &at_end, false).unwrap(),
            RotationDecision::SkipAndContinue
        );
    }

    /// Unparseable first line: the file's span is unknown, so it is
    /// searched and the walk continues.
    #[test]
    fn test_classify_unparseable_first_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = plain(dir.path(), "a.log", "=== service restarted ===\n");
        assert_eq!(
            classify(&window(), &path, false).unwrap(),
            RotationDecision::SearchAndContinue
        );

        let empty = plain(dir.path(), "empty.log", "");
        assert_eq!(
            classify(&window(), &empty, false).unwrap(),
            RotationDecision::SearchAndContinue
        );
    }

    #[test]
    fn test_classify_reads_gzip_first_line() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = gzipped(
            dir.path(),
            "a.log.3.gz",
            "2022-06-01T10:00:00 archived entry\n",
        );
        assert_eq!(
            classify(&window(), &path, true).unwrap(),
            RotationDecision::StopAfterCurrent
        );
    }

    #[test]
    fn test_rotated_path_naming() {
        let base = Path::new("/var/log/service.log");
        assert_eq!(
            rotated_path(base, 1, false),
            PathBuf::from("/var/log/service.log.1")
        );
        assert_eq!(
            rotated_path(base, 4, true),
            PathBuf::from("/var/log/service.log.4.gz")
        );
    }

    #[test]
    fn test_tolerated_missing_pattern() {
        assert!(is_tolerated_missing(Path::new(
            "/scratch/controller-1_20230101/var/log/mtcAgent.log"
        )));
        assert!(!is_tolerated_missing(Path::new(
            "/scratch/controller-0_20230101/var/log/mtcAgent.log"
        )));
        assert!(!is_tolerated_missing(Path::new(
            "/scratch/controller-1_20230101/var/log/sm.log"
        )));
    }

    /// A missing non-tolerated path is logged, not propagated; the
    /// remaining paths still contribute.
    #[test]
    fn test_missing_path_does_not_abort_other_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let present = plain(
            dir.path(),
            "present.log",
            "2023-01-01T10:00:00 event kept\n",
        );
        let missing = dir.path().join("missing.log");

        let lines = substring(
            &window(),
            &["event".to_string()],
            &[missing, present],
        )
        .expect("missing path must not be fatal");
        assert_eq!(lines, vec!["2023-01-01T10:00:00 event kept"]);
    }
}
