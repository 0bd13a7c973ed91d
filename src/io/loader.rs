//! Input parsing
//!
//! Encrypt input is one word per line. Decrypt input is two lines per
//! record: the shuffled word, then its permutation as whitespace-separated
//! integers. `\r\n` line endings are accepted and a final newline does not
//! start a new record.

use crate::batch::{MAX_BATCH_SLOTS, MAX_WORD_LEN, Mode, WordSlot, WorkBatch};
use crate::error::ShuffleError;
use log::debug;
use std::fs;
use std::path::Path;

/// Read `path` into a batch for `mode`.
///
/// Fails with `EmptyBatch` when the file holds no records.
pub fn load(path: &Path, mode: Mode) -> Result<WorkBatch, ShuffleError> {
    let text = fs::read_to_string(path).map_err(|e| ShuffleError::load(path, e.to_string()))?;
    let batch =
        parse(&text, mode, MAX_BATCH_SLOTS).map_err(|reason| ShuffleError::load(path, reason))?;

    if batch.is_empty() {
        return Err(ShuffleError::EmptyBatch);
    }

    debug!("Loaded {} records from {}", batch.len(), path.display());
    Ok(batch)
}

/// Parse input text into a batch holding at most `capacity` slots.
pub fn parse(text: &str, mode: Mode, capacity: usize) -> Result<WorkBatch, String> {
    let mut batch = WorkBatch::with_capacity(mode, capacity);
    let mut lines = text.lines().enumerate().map(|(i, line)| (i + 1, line));

    while let Some((line_no, word)) = lines.next() {
        check_word(word, line_no)?;

        let slot = match mode {
            Mode::Encrypt => WordSlot::plain(word),
            Mode::Decrypt => {
                let (perm_line_no, perm_line) = lines.next().ok_or_else(|| {
                    format!(
                        "record {} (line {}) is missing its permutation line",
                        batch.len() + 1,
                        line_no
                    )
                })?;
                WordSlot::shuffled(word, parse_permutation(perm_line, perm_line_no)?)
            }
        };

        batch.try_push(slot).map_err(|_| {
            format!(
                "line {}: input holds more than {} records",
                line_no, capacity
            )
        })?;
    }

    Ok(batch)
}

fn check_word(word: &str, line_no: usize) -> Result<(), String> {
    let len = word.chars().count();
    if len > MAX_WORD_LEN {
        return Err(format!(
            "line {}: word has {} characters, the maximum is {}",
            line_no, len, MAX_WORD_LEN
        ));
    }
    Ok(())
}

/// Parse a whitespace-separated list of non-negative indices.
///
/// Only the syntax and the length bound are checked here; whether the
/// indices form a valid permutation of the word is decided when inverting.
pub fn parse_permutation(line: &str, line_no: usize) -> Result<Vec<usize>, String> {
    let permutation = line
        .split_whitespace()
        .map(|token| {
            token.parse::<usize>().map_err(|_| {
                format!(
                    "line {}: '{}' is not a non-negative integer",
                    line_no, token
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if permutation.len() > MAX_WORD_LEN {
        return Err(format!(
            "line {}: permutation has {} entries, the maximum is {}",
            line_no,
            permutation.len(),
            MAX_WORD_LEN
        ));
    }

    Ok(permutation)
}
