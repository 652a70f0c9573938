// logreach - core/filter.rs
//
// Window filtering of searched log lines.
// Core layer: consumes any fallible line iterator; no knowledge of files
// or processes.

use crate::core::window::{self, TimeWindow};
use crate::util::constants;
use regex::Regex;
use std::io;
use std::sync::OnceLock;

/// Byte offsets at which a line may carry its timestamp: column zero, or
/// shifted past a two-character severity marker. Exact contracts for the
/// two known line layouts.
const STAMP_OFFSETS: [usize; 2] = [0, constants::PREFIXED_TIMESTAMP_OFFSET];

/// Filter one search invocation's output against `window`, appending kept
/// lines to `results`.
///
/// I/O failures from the underlying stream are fatal and propagate.
pub fn filter_lines<I>(window: &TimeWindow, lines: I, results: &mut Vec<String>) -> io::Result<()>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    for line in lines {
        if let Some(kept) = evaluate(window, line?) {
            results.push(kept);
        }
    }
    Ok(())
}

/// Decide one line's fate.
///
/// The candidate offsets are tried in order; the first candidate that
/// parses as a timestamp decides the line by strict window containment and
/// ends the evaluation. A line with no parseable candidate is kept
/// unconditionally: it is a wrapped continuation of the previous entry,
/// not a new timestamped event.
fn evaluate(window: &TimeWindow, line: String) -> Option<String> {
    for &offset in &STAMP_OFFSETS {
        let in_window = match window::stamp_at(&line, offset) {
            Some(stamp) if window::is_valid_stamp(stamp) => window.contains(stamp),
            _ => continue,
        };
        if !in_window {
            return None;
        }
        if line.starts_with('|') {
            return Some(collapse_pipe_line(&line));
        }
        return Some(line);
    }
    Some(line)
}

/// Known line-format exception: one log source emits pipe-prefixed,
/// irregularly spaced lines. Strip the leading `|`, trim, and collapse
/// runs of internal whitespace to a single space.
fn collapse_pipe_line(line: &str) -> String {
    static WHITESPACE_RUN: OnceLock<Regex> = OnceLock::new();
    let re = WHITESPACE_RUN.get_or_init(|| Regex::new(r"\s+").expect("whitespace-run regex"));
    re.replace_all(line[1..].trim(), " ").into_owned()
}
