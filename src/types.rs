//! Public and internal types for the import API and pipeline.

use std::path::PathBuf;

/// One valid CSV row: a timestamp and a decimal value, both kept as the exported text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reading {
    pub timestamp: String,
    pub value: String,
}

/// Where imported rows go.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    /// MySQL DSN: `mysql://` URL or `user:pass@tcp(host:port)/db` driver syntax.
    MySql(String),
    /// SQLite database file (created if missing).
    Sqlite(PathBuf),
}

/// Full options (CLI, config file and lib).
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Import root. Required; there is no implicit current-directory default.
    pub input_dir: Option<PathBuf>,
    /// Database to write to. Required unless [`Self::dry_run`] is set.
    pub target: Option<Target>,
    /// Import every `.csv` file regardless of its modification time.
    pub force_all: bool,
    /// Abort the whole run on the first file or traversal error instead of continuing.
    pub strict: bool,
    /// Parse and translate only; log statements instead of executing them.
    pub dry_run: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax, matched against file name and full path).
    pub exclude: Vec<String>,
    /// Debug logging.
    pub verbose: bool,
}

/// Outcome of importing one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub table: String,
    /// Valid rows sent to the database.
    pub rows: usize,
    /// Rows dropped for having a field count other than two.
    pub dropped: usize,
    /// Rows the database actually inserted (the rest were duplicate timestamps).
    /// `None` in dry-run mode, where nothing is executed.
    pub inserted: Option<u64>,
}

impl FileReport {
    /// Rows ignored by the database because their timestamp was already present.
    /// Zero when nothing was executed.
    pub fn duplicates(&self) -> u64 {
        self.inserted.map_or(0, |n| (self.rows as u64).saturating_sub(n))
    }
}

/// Result of a whole run.
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub imported: Vec<FileReport>,
    /// `.csv` files skipped because they were last modified before today.
    pub stale: Vec<PathBuf>,
    /// Files that failed to import, with the error chain.
    pub failed: Vec<(PathBuf, String)>,
    /// Paths the walk could not read, with the error.
    pub walk_errors: Vec<(PathBuf, String)>,
}

impl ImportSummary {
    /// Valid rows read across all imported files.
    pub fn rows(&self) -> usize {
        self.imported.iter().map(|r| r.rows).sum()
    }

    pub fn rows_inserted(&self) -> u64 {
        self.imported.iter().filter_map(|r| r.inserted).sum()
    }

    pub fn duplicates(&self) -> u64 {
        self.imported.iter().map(FileReport::duplicates).sum()
    }

    pub fn rows_dropped(&self) -> usize {
        self.imported.iter().map(|r| r.dropped).sum()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || !self.walk_errors.is_empty()
    }
}
