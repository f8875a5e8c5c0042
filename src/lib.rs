//! homee_csv_to_mysql: load daily homee sensor CSV exports into per-sensor database tables

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use chrono::Local;
use log::debug;
use std::path::Path;

/// Result alias used by public API
pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: import every qualifying CSV file under `root` into the database named by
/// `opts.target`, and return what happened.
///
/// The root is validated before any connection is made. One connection is opened for the whole
/// run and closed when this returns, on success or error. "Today" is fixed when the call starts.
///
/// ```ignore
/// let opts = Opts { target: Some(Target::MySql(dsn)), ..Default::default() };
/// let summary = homee_csv_to_mysql::import_dir(Path::new("/srv/homee"), &opts)?;
/// ```
pub fn import_dir(root: &Path, opts: &Opts) -> Result<ImportSummary> {
    let config_str = format!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        RedactedOpts(opts)
    );
    debug!("{}", config_str);

    let root = engine::tools::canonicalize_root(root)?;
    let mut store = engine::open_store(opts)?;
    pipeline::import_tree(&root, opts, store.as_mut(), &Local::now())
}

/// Debug view of [`Opts`] without DSN credentials.
struct RedactedOpts<'a>(&'a Opts);

impl std::fmt::Debug for RedactedOpts<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let o = self.0;
        let target = match &o.target {
            Some(Target::MySql(dsn)) => match engine::dsn_to_url(dsn) {
                Ok(mut url) => {
                    let _ = url.set_password(None);
                    format!("MySql({url})")
                }
                Err(_) => "MySql(<invalid DSN>)".to_string(),
            },
            Some(Target::Sqlite(p)) => format!("Sqlite({})", p.display()),
            None => "None".to_string(),
        };
        f.debug_struct("Opts")
            .field("input_dir", &o.input_dir)
            .field("target", &target)
            .field("force_all", &o.force_all)
            .field("strict", &o.strict)
            .field("dry_run", &o.dry_run)
            .field("follow_links", &o.follow_links)
            .field("exclude", &o.exclude)
            .finish()
    }
}
