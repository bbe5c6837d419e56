pub mod types;

pub use types::{OutputFormat, Report};

use crate::numstat::{self, DiffTotals, NumstatError};
use colored::Colorize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    FileWrite(#[from] std::io::Error),

    #[error(transparent)]
    Numstat(#[from] NumstatError),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse a raw diff summary into a Report with totals.
pub fn build(diff_summary: &str) -> Result<Report, ReportError> {
    let files = numstat::parse_numstat(diff_summary)?;
    let totals = DiffTotals::from_entries(&files);
    Ok(Report { files, totals })
}

/// Render the diff summary in the requested format.
///
/// `Raw` never parses the text, so it passes through whatever git printed.
/// Color is only applied to `Summary` and only when `color` is set.
pub fn render(
    diff_summary: &str,
    format: OutputFormat,
    color: bool,
) -> Result<String, ReportError> {
    match format {
        OutputFormat::Raw => Ok(diff_summary.to_string()),
        OutputFormat::Summary => Ok(render_summary(&build(diff_summary)?, color)),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&build(diff_summary)?)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Write rendered output to stdout (default) or to a file.
#[instrument(skip(rendered), fields(bytes = rendered.len()))]
pub fn output(rendered: &str, output_path: Option<&Path>) -> Result<(), ReportError> {
    match output_path {
        None => {
            debug!("writing diff summary to stdout");
            print!("{}", rendered);
            Ok(())
        }
        Some(path) => {
            debug!(path = %path.display(), "writing diff summary to file");
            std::fs::write(path, rendered)?;
            Ok(())
        }
    }
}

/// Format a table like:
///
///    +5    -0  README.md
///    bin       assets/logo.png
///
/// 2 files changed, +5 -0 (1 binary)
fn render_summary(report: &Report, color: bool) -> String {
    let mut out = String::new();

    for file in &report.files {
        let counts = match (file.added, file.removed) {
            (Some(added), Some(removed)) => format!(
                "{} {}",
                paint(&format!("{:>6}", format!("+{}", added)), color, |s| s.green()),
                paint(&format!("{:>6}", format!("-{}", removed)), color, |s| s.red()),
            ),
            _ => format!("{:>6} {:>6}", "bin", ""),
        };
        out.push_str(&format!("{}  {}\n", counts, file.path));
    }

    let totals = &report.totals;
    let noun = if totals.files_changed == 1 { "file" } else { "files" };
    out.push_str(&format!(
        "\n{} {} changed, {} {}",
        totals.files_changed,
        noun,
        paint(&format!("+{}", totals.additions), color, |s| s.green()),
        paint(&format!("-{}", totals.deletions), color, |s| s.red()),
    ));
    if totals.binary_files > 0 {
        out.push_str(&format!(" ({} binary)", totals.binary_files));
    }
    out.push('\n');
    out
}

fn paint(text: &str, color: bool, style: fn(&str) -> colored::ColoredString) -> String {
    if color {
        style(text).bold().to_string()
    } else {
        text.to_string()
    }
}
