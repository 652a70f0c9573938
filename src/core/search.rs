// logreach - core/search.rs
//
// The external substring search, exposed as a lazy line stream.
//
// Each invocation spawns the OS search utility over one file with stdout
// piped; lines are produced on demand and the child is reaped when the
// stream is dropped. The stream is finite and not restartable.

use crate::util::constants;
use crate::util::error::ExtractError;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};

/// Combine the pattern set into one extended-regex alternation.
/// Patterns are trusted input; no escaping is performed.
pub fn alternation(patterns: &[String]) -> String {
    patterns.join("|")
}

/// Lazily yields matching lines from one search invocation.
pub struct SearchStream {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
}

impl SearchStream {
    /// Launch the search utility over `path` with `pattern` as an
    /// extended-regex alternation.
    ///
    /// Plain files use `grep -Ea` (the `a` treats the file as text so stray
    /// binary bytes do not suppress matches); compressed rotations use
    /// `zgrep -E`. Diagnostic output from the utility is discarded. A
    /// non-zero exit for "no matches" simply yields an empty stream; only
    /// failure to launch the program at all is an error.
    pub fn spawn(path: &Path, pattern: &str, compressed: bool) -> Result<Self, ExtractError> {
        let program = if compressed {
            constants::COMPRESSED_SEARCH_PROGRAM
        } else {
            constants::SEARCH_PROGRAM
        };

        let mut command = Command::new(program);
        if compressed {
            command.arg("-E");
        } else {
            command.arg("-Ea");
        }

        let mut child = command
            .arg(pattern)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| ExtractError::SearchSpawn {
                program,
                path: path.to_path_buf(),
                source: e,
            })?;

        let stdout = child.stdout.take().expect("stdout was requested as piped");
        tracing::debug!(program, file = %path.display(), "Search started");

        Ok(Self {
            child,
            lines: BufReader::new(stdout).lines(),
        })
    }
}

impl Iterator for SearchStream {
    type Item = std::io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next()
    }
}

impl Drop for SearchStream {
    fn drop(&mut self) {
        // Kill before waiting so an abandoned stream cannot deadlock on a
        // child blocked writing into the no-longer-read pipe. For a child
        // that already exited the kill is a no-op error, ignored.
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
