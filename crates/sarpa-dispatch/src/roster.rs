//! JSONL roster persistence: one responder per line.
//!
//! The interchange format for the external responder feed. Blank lines
//! and `#` comments are skipped; parse errors carry the line number.

use crate::directory::{DirectoryError, ResponderDirectory};
use crate::responder::Responder;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Read responders from a JSONL reader.
pub fn read_responders(reader: impl BufRead) -> Result<Vec<Responder>, RosterError> {
    let mut responders = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| RosterError::Io(line_no + 1, e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let responder: Responder = serde_json::from_str(trimmed)
            .map_err(|e| RosterError::Parse(line_no + 1, e.to_string()))?;
        responders.push(responder);
    }
    Ok(responders)
}

/// Write responders to a JSONL writer.
pub fn write_responders(
    writer: &mut impl Write,
    responders: &[Responder],
) -> Result<(), RosterError> {
    for responder in responders {
        let line =
            serde_json::to_string(responder).map_err(|e| RosterError::Serialize(e.to_string()))?;
        writeln!(writer, "{line}").map_err(|e| RosterError::Io(0, e.to_string()))?;
    }
    Ok(())
}

/// Read a roster file.
pub fn read_responders_from_path(path: impl AsRef<Path>) -> Result<Vec<Responder>, RosterError> {
    let path = path.as_ref();
    let file =
        File::open(path).map_err(|e| RosterError::Io(0, format!("{}: {e}", path.display())))?;
    read_responders(BufReader::new(file))
}

/// Write a roster file.
///
/// Writes to a sibling temp file and renames it over the target, so a
/// failed save never leaves a truncated roster behind.
pub fn write_responders_to_path(
    path: impl AsRef<Path>,
    responders: &[Responder],
) -> Result<(), RosterError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .map_err(|e| RosterError::Io(0, format!("{}: {e}", parent.display())))?;
    }

    let tmp_path = tmp_write_path(path);
    let write_result = (|| -> Result<(), RosterError> {
        let file = File::create(&tmp_path)
            .map_err(|e| RosterError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let mut writer = BufWriter::new(file);
        write_responders(&mut writer, responders)?;
        writer
            .flush()
            .map_err(|e| RosterError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        let file = writer
            .into_inner()
            .map_err(|e| RosterError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        file.sync_all()
            .map_err(|e| RosterError::Io(0, format!("{}: {e}", tmp_path.display())))?;
        Ok(())
    })();

    if let Err(error) = write_result {
        let _ = fs::remove_file(&tmp_path);
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        RosterError::Io(
            0,
            format!("{} -> {}: {e}", tmp_path.display(), path.display()),
        )
    })?;

    Ok(())
}

fn tmp_write_path(path: &Path) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let mut tmp: OsString = path.as_os_str().to_os_string();
    tmp.push(format!(".tmp.{}.{}", std::process::id(), unique));
    PathBuf::from(tmp)
}

/// Load a roster file into a directory, preserving file order.
///
/// Returns the number of responders seeded.
pub fn seed_directory(
    directory: &ResponderDirectory,
    path: impl AsRef<Path>,
) -> Result<usize, RosterError> {
    let responders = read_responders_from_path(path)?;
    let count = responders.len();
    for responder in responders {
        directory.upsert(responder)?;
    }
    tracing::debug!(count, "roster seeded");
    Ok(count)
}

/// Errors from roster I/O and seeding.
#[derive(Debug, thiserror::Error)]
pub enum RosterError {
    #[error("line {0}: I/O error: {1}")]
    Io(usize, String),

    #[error("line {0}: parse error: {1}")]
    Parse(usize, String),

    #[error("serialization error: {0}")]
    Serialize(String),

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
