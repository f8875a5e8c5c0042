use anyhow::Result;
use log::{info, warn};

use crate::utils::Colors;
use crate::{ImportSummary, Opts};

/// Log the end-of-run summary line and, in verbose mode, every failed path.
pub fn report_summary(summary: &ImportSummary, opts: &Opts) {
    let rows = if opts.dry_run {
        format!("rows: {} translated", summary.rows())
    } else {
        format!(
            "rows: {} new, {} duplicate",
            summary.rows_inserted(),
            summary.duplicates()
        )
    };
    info!(
        "{} | {} | {} | {}, {}",
        Colors::colorize(
            Colors::IMPORTED,
            &format!("Imported: {}", summary.imported.len())
        ),
        Colors::colorize(Colors::STALE, &format!("Stale: {}", summary.stale.len())),
        Colors::colorize(
            Colors::FAILED,
            &format!(
                "Failed: {}",
                summary.failed.len() + summary.walk_errors.len()
            )
        ),
        rows,
        Colors::colorize(
            Colors::DROPPED,
            &format!("{} dropped", summary.rows_dropped())
        ),
    );
    if opts.verbose {
        for (p, msg) in summary.failed.iter().chain(summary.walk_errors.iter()) {
            eprintln!("  failed: {}: {}", p.display(), msg);
        }
    }
}

/// Turn collected failures into an error so the process exits non-zero. Call after the walk.
pub fn check_for_failures(summary: &ImportSummary) -> Result<()> {
    if !summary.has_failures() {
        return Ok(());
    }
    if !summary.walk_errors.is_empty() {
        warn!(
            "Skipped {} paths due to permission errors or access issues",
            summary.walk_errors.len()
        );
    }
    Err(anyhow::anyhow!(
        "{} file(s) failed to import, {} path(s) unreadable",
        summary.failed.len(),
        summary.walk_errors.len()
    ))
}
