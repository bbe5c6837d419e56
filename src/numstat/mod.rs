pub mod types;

pub use types::{DiffTotals, NumstatEntry};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumstatError {
    #[error("Malformed numstat line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

/// Parse `git diff --numstat` output into one entry per changed file.
///
/// Each line has the form `<added>\t<removed>\t<path>`. Git prints `-` for
/// both counts on binary files. Blank lines are ignored.
pub fn parse_numstat(raw: &str) -> Result<Vec<NumstatEntry>, NumstatError> {
    let mut entries = Vec::new();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let line_number = index + 1;
        let malformed = |reason: &str| NumstatError::Malformed {
            line: line_number,
            reason: reason.to_string(),
        };

        // path may itself contain tabs, so only split off the two counts
        let mut fields = line.splitn(3, '\t');
        let added = fields.next().ok_or_else(|| malformed("missing added count"))?;
        let removed = fields
            .next()
            .ok_or_else(|| malformed("missing removed count"))?;
        let path = fields.next().ok_or_else(|| malformed("missing path"))?;
        if path.is_empty() {
            return Err(malformed("empty path"));
        }

        entries.push(NumstatEntry {
            path: path.to_string(),
            added: parse_count(added).ok_or_else(|| malformed("invalid added count"))?,
            removed: parse_count(removed).ok_or_else(|| malformed("invalid removed count"))?,
        });
    }

    Ok(entries)
}

/// `-` marks a binary file; anything else must be a plain number.
fn parse_count(field: &str) -> Option<Option<usize>> {
    if field == "-" {
        Some(None)
    } else {
        field.parse::<usize>().ok().map(Some)
    }
}
