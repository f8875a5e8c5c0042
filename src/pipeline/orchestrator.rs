use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::path::Path;

use crate::engine::db_ops::SensorStore;
use crate::engine::freshness::{Freshness, classify, local_mtime};
use crate::engine::sanitize::table_name_from_file_name;
use crate::engine::tools::path_relative_to;
use crate::engine::translate::{read_records, records_to_batch};
use crate::{FileReport, ImportSummary, Opts};

use super::walk::{WalkOutcome, walk_iter};

/// Path for log lines: relative to the import root when possible.
fn display_path(path: &Path, root: &Path) -> String {
    path_relative_to(path, root)
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

/// Import one CSV file: read → provision table → translate → execute.
pub fn import_file(store: &mut dyn SensorStore, path: &Path) -> Result<FileReport> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("{} has no file name", path.display()))?;
    let table = table_name_from_file_name(&file_name)?;

    let records = read_records(path)?;
    store.ensure_table(&table)?;
    let batch = records_to_batch(&table, &records);

    let inserted = if batch.is_empty() {
        debug!("{}: no valid rows", path.display());
        Some(0)
    } else {
        debug!(
            "{}: {} rows -> {}",
            path.display(),
            batch.readings.len(),
            table
        );
        store.insert_batch(&batch)?
    };

    let report = FileReport {
        path: path.to_path_buf(),
        table,
        rows: batch.readings.len(),
        dropped: batch.dropped,
        inserted,
    };
    match report.inserted {
        Some(n) => info!(
            "Imported {} -> {} ({} new, {} duplicate, {} dropped)",
            path.display(),
            report.table,
            n,
            report.duplicates(),
            report.dropped
        ),
        None => info!(
            "Translated {} -> {} ({} rows, {} dropped)",
            path.display(),
            report.table,
            report.rows,
            report.dropped
        ),
    }
    Ok(report)
}

/// Main orchestrator: walk `root`, apply the freshness filter against `now`, import each
/// qualifying file into `store`.
///
/// In strict mode the first traversal or file error aborts the run. Otherwise failures are
/// collected in the returned summary and the walk continues.
pub fn import_tree(
    root: &Path,
    opts: &Opts,
    store: &mut dyn SensorStore,
    now: &DateTime<Local>,
) -> Result<ImportSummary> {
    let mut summary = ImportSummary::default();
    info!("Reading files from {}", root.display());
    if opts.force_all {
        debug!("force-all: importing every CSV file regardless of age");
    }

    for outcome in walk_iter(root, opts.follow_links, &opts.exclude) {
        match outcome {
            WalkOutcome::Err { msg, path } => {
                let path = path.unwrap_or_else(|| root.to_path_buf());
                if opts.strict {
                    return Err(anyhow!("walk {}: {}", path.display(), msg));
                }
                warn!("Cannot read {}: {}", path.display(), msg);
                summary.walk_errors.push((path, msg));
            }
            WalkOutcome::Ok {
                path,
                is_dir,
                modified,
            } => {
                let modified = local_mtime(modified);
                match classify(&path, is_dir, &modified, now, opts.force_all) {
                    Freshness::NotCandidate => {}
                    Freshness::Stale => {
                        info!(
                            "Skipping {}, last modified {} (before today)",
                            display_path(&path, root),
                            modified.format("%Y-%m-%d %H:%M:%S")
                        );
                        summary.stale.push(path);
                    }
                    Freshness::Import => match import_file(store, &path) {
                        Ok(report) => summary.imported.push(report),
                        Err(e) if opts.strict => {
                            return Err(e.context(format!("import {}", path.display())));
                        }
                        Err(e) => {
                            warn!("Failed to import {}: {:#}", display_path(&path, root), e);
                            summary.failed.push((path, format!("{:#}", e)));
                        }
                    },
                }
            }
        }
    }
    Ok(summary)
}
