use serde::Serialize;

use crate::numstat::{DiffTotals, NumstatEntry};

/// How the diff summary is written out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// The numstat text exactly as git printed it
    #[default]
    Raw,
    /// Human-readable table with totals
    Summary,
    /// JSON document with per-file entries and totals
    Json,
}

/// Parsed diff summary ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub files: Vec<NumstatEntry>,
    pub totals: DiffTotals,
}
