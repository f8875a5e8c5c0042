//! MySQL backend.

use anyhow::{Context, Result};
use log::debug;
use mysql::prelude::Queryable;
use mysql::{Conn, Params, TxOpts, Value};

use super::SensorStore;
use super::dsn_to_url;
use crate::engine::translate::{Dialect, InsertBatch, create_table_sql, insert_sql};

pub struct MySqlStore {
    conn: Conn,
}

impl MySqlStore {
    /// Connect once for the whole run. Accepts a `mysql://` URL or a driver-style DSN.
    pub fn connect(dsn: &str) -> Result<Self> {
        let url = dsn_to_url(dsn)?;
        debug!(
            "Connecting to MySQL at {}:{}",
            url.host_str().unwrap_or("localhost"),
            url.port().unwrap_or(3306)
        );
        let conn = Conn::new(url.as_str()).context("connect to MySQL")?;
        Ok(Self { conn })
    }
}

impl SensorStore for MySqlStore {
    fn dialect(&self) -> Dialect {
        Dialect::MySql
    }

    fn ensure_table(&mut self, table: &str) -> Result<()> {
        self.conn
            .query_drop(create_table_sql(table))
            .with_context(|| format!("create table {table}"))
    }

    fn insert_batch(&mut self, batch: &InsertBatch) -> Result<Option<u64>> {
        let mut tx = self
            .conn
            .start_transaction(TxOpts::default())
            .context("begin transaction")?;
        let mut inserted = 0_u64;
        for chunk in batch.chunks() {
            let sql = insert_sql(Dialect::MySql, &batch.table, chunk.len());
            let values: Vec<Value> = chunk
                .iter()
                .flat_map(|r| {
                    [
                        Value::from(r.timestamp.as_str()),
                        Value::from(r.value.as_str()),
                    ]
                })
                .collect();
            tx.exec_drop(sql, Params::Positional(values))
                .with_context(|| format!("insert into {}", batch.table))?;
            inserted += tx.affected_rows();
        }
        tx.commit().context("commit transaction")?;
        Ok(Some(inserted))
    }
}
