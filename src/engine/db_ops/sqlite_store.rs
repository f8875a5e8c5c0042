//! SQLite backend (local targets and tests).

use anyhow::{Context, Result};
use rusqlite::{Connection, params_from_iter};
use std::path::Path;

use super::SensorStore;
use crate::engine::translate::{Dialect, InsertBatch, create_table_sql, insert_sql};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database file.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("open SQLite database {}", path.display()))?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        Ok(Self { conn })
    }

    /// Underlying connection, for queries outside the import path.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl SensorStore for SqliteStore {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn ensure_table(&mut self, table: &str) -> Result<()> {
        self.conn
            .execute_batch(&create_table_sql(table))
            .with_context(|| format!("create table {table}"))
    }

    fn insert_batch(&mut self, batch: &InsertBatch) -> Result<Option<u64>> {
        let tx = self.conn.transaction().context("begin transaction")?;
        let mut inserted = 0_u64;
        for chunk in batch.chunks() {
            let sql = insert_sql(Dialect::Sqlite, &batch.table, chunk.len());
            let values = chunk
                .iter()
                .flat_map(|r| [r.timestamp.as_str(), r.value.as_str()]);
            let n = tx
                .execute(&sql, params_from_iter(values))
                .with_context(|| format!("insert into {}", batch.table))?;
            inserted += n as u64;
        }
        tx.commit().context("commit transaction")?;
        Ok(Some(inserted))
    }
}
