// logreach - main.rs
//
// CLI entry point. Handles:
// 1. Argument parsing and window-format validation
// 2. Logging initialisation (debug mode support)
// 3. Running the extraction and emitting the sorted result

use clap::Parser;
use logreach::core::window::{self, TimeWindow};
use logreach::core::{export, rotation};
use logreach::util;
use logreach::util::error::ExtractError;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// logreach - time-windowed extraction from rotated log file chains.
///
/// Scans each log file and its rotated/compressed predecessors for lines
/// matching any of the given patterns, keeping lines whose embedded
/// timestamp falls strictly inside the window. The result is one combined,
/// chronologically sorted list.
#[derive(Parser, Debug)]
#[command(name = "logreach", version, about)]
struct Cli {
    /// Window start, YYYY-MM-DDTHH:MM:SS (exclusive).
    start: String,

    /// Window end, YYYY-MM-DDTHH:MM:SS (exclusive).
    end: String,

    /// Primary (non-rotated) log files to search.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Substring pattern to look for (repeatable; patterns are combined
    /// into one extended-regex alternation, unescaped).
    #[arg(short = 'e', long = "pattern", required = true)]
    patterns: Vec<String>,

    /// Write the result to this file instead of stdout.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Emit the result as a JSON array of strings.
    #[arg(long = "json")]
    json: bool,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    util::logging::init(cli.debug);

    tracing::info!(
        version = util::constants::APP_VERSION,
        files = cli.files.len(),
        patterns = cli.patterns.len(),
        "logreach starting"
    );

    // Window bounds must be well-formed; their ordering is the caller's
    // responsibility and is deliberately not checked.
    for bound in [&cli.start, &cli.end] {
        if !window::is_valid_stamp(bound) {
            let err = ExtractError::InvalidTimestamp {
                value: bound.clone(),
            };
            eprintln!("Error: {err}");
            return ExitCode::from(2);
        }
    }

    let time_window = TimeWindow::new(cli.start.as_str(), cli.end.as_str());

    let lines = match rotation::substring(&time_window, &cli.patterns, &cli.files) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!(error = %e, "Extraction failed");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(matched = lines.len(), "Extraction complete");

    let written = match &cli.output {
        Some(path) => write_to_file(&lines, path, cli.json),
        None => {
            let stdout = std::io::stdout().lock();
            let pseudo = Path::new("-");
            if cli.json {
                export::export_json(&lines, stdout, pseudo)
            } else {
                export::export_text(&lines, stdout, pseudo)
            }
        }
    };

    match written {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to write result");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Write the sorted result to `path` in the selected format.
fn write_to_file(lines: &[String], path: &Path, json: bool) -> Result<usize, ExtractError> {
    let file = std::fs::File::create(path).map_err(|e| ExtractError::Io {
        path: path.to_path_buf(),
        operation: "create",
        source: e,
    })?;
    let writer = std::io::BufWriter::new(file);

    let count = if json {
        export::export_json(lines, writer, path)?
    } else {
        export::export_text(lines, writer, path)?
    };

    tracing::info!(count, output = %path.display(), "Result written");
    Ok(count)
}
