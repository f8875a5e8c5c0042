//! Database operations: sensor table provisioning and duplicate-ignoring bulk inserts.

mod connection;
mod dry_run;
mod mysql_store;
mod sqlite_store;

pub use connection::{dsn_to_url, open_store};
pub use dry_run::DryRunStore;
pub use mysql_store::MySqlStore;
pub use sqlite_store::SqliteStore;

use anyhow::Result;

use crate::engine::translate::{Dialect, InsertBatch};

/// A database holding one table per sensor.
///
/// Implementations own a single connection for the whole run; dropping the store closes it.
pub trait SensorStore {
    fn dialect(&self) -> Dialect;

    /// Create `table` with the fixed `(homee_ts, val)` schema if it does not exist yet.
    fn ensure_table(&mut self, table: &str) -> Result<()>;

    /// Insert every reading of `batch` into `batch.table`, ignoring rows whose timestamp is
    /// already present. All chunks of one batch commit together. Returns rows actually
    /// inserted, or `None` when the store executed nothing.
    fn insert_batch(&mut self, batch: &InsertBatch) -> Result<Option<u64>>;
}
