//! Freshness filter: import only `.csv` files modified since local midnight (unless forced).

use chrono::{DateTime, Local, NaiveDateTime, NaiveTime, TimeZone};
use std::path::Path;
use std::time::SystemTime;

use crate::utils::config::CSV_SUFFIX;

/// Start of the calendar day `now` falls on, in `now`'s own time zone.
pub fn midnight_of<Tz: TimeZone>(now: &DateTime<Tz>) -> NaiveDateTime {
    now.date_naive().and_time(NaiveTime::MIN)
}

/// True if `modified` is strictly after midnight of the day `now` falls on.
/// Compared in local wall-clock time, so both sides must be in the same zone.
pub fn is_fresh<Tz: TimeZone>(modified: &DateTime<Tz>, now: &DateTime<Tz>) -> bool {
    modified.naive_local() > midnight_of(now)
}

/// True if the file name ends with `.csv` (case-sensitive).
pub fn is_csv(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().ends_with(CSV_SUFFIX))
        .unwrap_or(false)
}

/// Verdict of the freshness filter for one walked path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Freshness {
    /// Directory or non-CSV file; silently ignored.
    NotCandidate,
    /// CSV file last modified before today.
    Stale,
    /// CSV file to import.
    Import,
}

/// Classify a walked path. Directories and non-CSV files are never imported; `force_all`
/// bypasses only the age check.
pub fn classify<Tz: TimeZone>(
    path: &Path,
    is_dir: bool,
    modified: &DateTime<Tz>,
    now: &DateTime<Tz>,
    force_all: bool,
) -> Freshness {
    if is_dir || !is_csv(path) {
        return Freshness::NotCandidate;
    }
    if force_all || is_fresh(modified, now) {
        Freshness::Import
    } else {
        Freshness::Stale
    }
}

/// Convert a filesystem mtime into local time.
pub fn local_mtime(modified: SystemTime) -> DateTime<Local> {
    DateTime::<Local>::from(modified)
}
