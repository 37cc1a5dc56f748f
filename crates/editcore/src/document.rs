//! Plain-text document load and save

use anyhow::Result;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads `path` as one record per line.
///
/// CRLF and LF line endings are both accepted. An empty file yields no
/// records.
pub fn load_lines(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        return Err(anyhow::anyhow!("File not found: {}", path.display()));
    }

    if !path.is_file() {
        return Err(anyhow::anyhow!("Not a regular file: {}", path.display()));
    }

    // Warn about large files (>10MB)
    const LARGE_FILE_THRESHOLD: u64 = 10 * 1024 * 1024;
    match fs::metadata(path) {
        Ok(metadata) if metadata.len() > LARGE_FILE_THRESHOLD => {
            log::warn!(
                "Large file detected ({} bytes): {}",
                metadata.len(),
                path.display()
            );
        }
        Ok(_) => {}
        Err(e) => log::warn!("Failed to get file metadata: {}", e),
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let error_msg = match e.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    format!("Permission denied reading: {}", path.display())
                }
                std::io::ErrorKind::NotFound => {
                    format!("File not found: {}", path.display())
                }
                std::io::ErrorKind::InvalidData => {
                    format!("File is not valid UTF-8: {}", path.display())
                }
                _ => format!("Failed to read {}: {}", path.display(), e),
            };
            return Err(anyhow::anyhow!(error_msg));
        }
    };

    if content.contains('\0') {
        return Err(anyhow::anyhow!(
            "File looks binary, refusing to edit: {}",
            path.display()
        ));
    }

    let lines: Vec<String> = content.lines().map(str::to_string).collect();

    log::info!("Read {} lines from {}", lines.len(), path.display());
    Ok(lines)
}

/// Writes `lines` to `path` in order, each terminated by `\n`, replacing any
/// existing content. Returns the number of lines written.
pub fn save_lines(path: &Path, lines: &[String]) -> Result<usize> {
    if let Ok(metadata) = fs::metadata(path) {
        if metadata.permissions().readonly() {
            return Err(anyhow::anyhow!("File is read-only: {}", path.display()));
        }
    }

    let file = fs::File::create(path).map_err(|e| {
        let error_msg = match e.kind() {
            std::io::ErrorKind::PermissionDenied => {
                format!("Permission denied writing: {}", path.display())
            }
            std::io::ErrorKind::NotFound => {
                format!("Directory does not exist for: {}", path.display())
            }
            _ => format!("Cannot open {} for writing: {}", path.display(), e),
        };
        anyhow::anyhow!(error_msg)
    })?;

    let mut writer = BufWriter::new(file);
    for line in lines {
        writeln!(writer, "{}", line)
            .map_err(|e| anyhow::anyhow!("Write to {} failed: {}", path.display(), e))?;
    }
    writer
        .flush()
        .map_err(|e| anyhow::anyhow!("Write to {} failed: {}", path.display(), e))?;

    log::info!("Wrote {} lines to {}", lines.len(), path.display());
    Ok(lines.len())
}
