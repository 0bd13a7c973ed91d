//! Output rendering
//!
//! The output file is written to a hidden sibling first and renamed into
//! place, so a failed run never leaves a partial file at the target path.

use crate::batch::{Mode, WorkBatch};
use crate::error::ShuffleError;
use log::debug;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Write a fully processed batch to `path`.
pub fn write(path: &Path, batch: &WorkBatch) -> Result<(), ShuffleError> {
    batch.ensure_well_formed()?;
    let contents = render(batch).map_err(|reason| ShuffleError::write(path, reason))?;

    let staging = staging_path(path);
    if let Err(e) = write_file(&staging, path, contents.as_bytes()) {
        let _ = fs::remove_file(&staging);
        return Err(ShuffleError::write(path, e.to_string()));
    }

    debug!("Wrote {} records to {}", batch.len(), path.display());
    Ok(())
}

/// Render a batch in the output format for its mode.
///
/// Encrypt output is two lines per record: the shuffled word, then each
/// permutation index followed by a space. Decrypt output is the recovered
/// word alone.
pub fn render(batch: &WorkBatch) -> Result<String, String> {
    let mut out = String::new();

    for (i, slot) in batch.slots().iter().enumerate() {
        if !slot.is_done() {
            return Err(format!("record {} was never processed", i + 1));
        }

        out.push_str(slot.result());
        out.push('\n');

        if batch.mode() == Mode::Encrypt {
            for index in slot.permutation() {
                let _ = write!(out, "{} ", index);
            }
            out.push('\n');
        }
    }

    Ok(out)
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    path.with_file_name(format!(".{}.partial", name))
}

fn write_file(staging: &Path, target: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(staging)?;
    file.write_all(bytes)?;
    file.sync_all()?;
    fs::rename(staging, target)
}
