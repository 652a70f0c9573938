// logreach - core/export.rs
//
// Plain-text and JSON output of the extraction result.
// Core layer: writes to any Write trait object.

use crate::util::error::ExtractError;
use std::io::Write;
use std::path::Path;

/// Write the result as plain text, one record per line.
///
/// Records that already end in a newline are written verbatim; all others
/// are newline-terminated.
pub fn export_text<W: Write>(
    lines: &[String],
    mut writer: W,
    out_path: &Path,
) -> Result<usize, ExtractError> {
    let io_err = |source| ExtractError::Io {
        path: out_path.to_path_buf(),
        operation: "write",
        source,
    };

    for line in lines {
        if line.ends_with('\n') {
            writer.write_all(line.as_bytes()).map_err(io_err)?;
        } else {
            writeln!(writer, "{line}").map_err(io_err)?;
        }
    }
    writer.flush().map_err(io_err)?;
    Ok(lines.len())
}

/// Write the result as a JSON array of strings.
pub fn export_json<W: Write>(
    lines: &[String],
    writer: W,
    out_path: &Path,
) -> Result<usize, ExtractError> {
    serde_json::to_writer_pretty(writer, lines).map_err(|e| ExtractError::Json {
        path: out_path.to_path_buf(),
        source: e,
    })?;
    Ok(lines.len())
}
