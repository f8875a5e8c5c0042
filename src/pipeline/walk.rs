//! Directory walk: yields every entry under the import root as a [`WalkOutcome`].

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

use crate::engine::tools::should_include_in_walk;

/// One result from a directory walk: an entry with its metadata, or an error with optional path.
pub enum WalkOutcome {
    Ok {
        path: PathBuf,
        is_dir: bool,
        modified: SystemTime,
    },
    Err {
        msg: String,
        path: Option<PathBuf>,
    },
}

/// Convert a walkdir result into [`WalkOutcome`], reading the entry's mtime.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> WalkOutcome {
    let entry = match r {
        Ok(entry) => entry,
        Err(err) => {
            return WalkOutcome::Err {
                msg: format!("{}", err),
                path: err.path().map(PathBuf::from),
            };
        }
    };
    let modified = entry
        .metadata()
        .map_err(|e| e.to_string())
        .and_then(|m| m.modified().map_err(|e| e.to_string()));
    match modified {
        Ok(modified) => WalkOutcome::Ok {
            is_dir: entry.file_type().is_dir(),
            path: entry.into_path(),
            modified,
        },
        Err(msg) => WalkOutcome::Err {
            msg,
            path: Some(entry.into_path()),
        },
    }
}

/// Serial, name-sorted walk of `root`. Excluded and OS metadata entries are pruned, so
/// excluded directories are not descended into.
pub fn walk_iter<'a>(
    root: &'a Path,
    follow_links: bool,
    exclude: &'a [String],
) -> impl Iterator<Item = WalkOutcome> + 'a {
    WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| e.depth() == 0 || should_include_in_walk(e.path(), root, exclude))
        .map(to_outcome_walkdir)
}
