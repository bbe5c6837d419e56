use serde::Serialize;

/// One line of `git diff --numstat` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumstatEntry {
    /// File path as printed by git (renames keep git's `old => new` form)
    pub path: String,
    /// Lines added, or None for binary files
    pub added: Option<usize>,
    /// Lines removed, or None for binary files
    pub removed: Option<usize>,
}

impl NumstatEntry {
    pub fn is_binary(&self) -> bool {
        self.added.is_none() && self.removed.is_none()
    }
}

/// Aggregate counts across a whole diff summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffTotals {
    pub files_changed: usize,
    pub additions: usize,
    pub deletions: usize,
    pub binary_files: usize,
}

impl DiffTotals {
    pub fn from_entries(entries: &[NumstatEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut totals, entry| {
            totals.files_changed += 1;
            totals.additions += entry.added.unwrap_or(0);
            totals.deletions += entry.removed.unwrap_or(0);
            if entry.is_binary() {
                totals.binary_files += 1;
            }
            totals
        })
    }
}
