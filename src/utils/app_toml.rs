//! Load `.homee_csv_to_mysql.toml` (CLI only). Lib callers build [`Opts`] directly.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{Opts, Target};

#[derive(Debug, Default, Deserialize)]
pub struct AppToml {
    #[serde(default)]
    settings: ImportSection,
}

#[derive(Debug, Default, Deserialize)]
struct ImportSection {
    input_dir: Option<String>,
    mysql_dsn: Option<String>,
    sqlite_db: Option<String>,
    force_all: Option<bool>,
    strict: Option<bool>,
    follow_links: Option<bool>,
    exclude: Option<Vec<String>>,
}

/// Load the config file at `path`. Returns None if missing; warns and returns None if unparseable.
pub fn load_app_toml(path: &Path) -> Option<AppToml> {
    let s = std::fs::read_to_string(path).ok()?;
    parse_app_toml(&s)
        .map_err(|e| log::warn!("{}: {}", path.display(), e))
        .ok()
}

pub fn parse_app_toml(s: &str) -> Result<AppToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($section:expr, $opts:expr, $field:ident) => {
        if let Some(v) = $section.$field {
            $opts.$field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before env and CLI.
/// `sqlite_db` wins over `mysql_dsn` when both are set in the file.
pub fn apply_file_to_opts(file: &AppToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref p) = s.input_dir {
        opts.input_dir = Some(PathBuf::from(p));
    }
    if let Some(ref dsn) = s.mysql_dsn {
        opts.target = Some(Target::MySql(dsn.clone()));
    }
    if let Some(ref p) = s.sqlite_db {
        opts.target = Some(Target::Sqlite(PathBuf::from(p)));
    }
    apply_file_opt!(s, opts, force_all);
    apply_file_opt!(s, opts, strict);
    apply_file_opt!(s, opts, follow_links);
    if let Some(ref v) = s.exclude {
        opts.exclude = v.clone();
    }
}
