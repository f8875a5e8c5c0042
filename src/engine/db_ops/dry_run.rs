//! Store that executes nothing: logs the statements a real run would send.

use anyhow::Result;
use log::info;

use super::SensorStore;
use crate::engine::translate::{Dialect, InsertBatch, create_table_sql};

/// Records the statements it was asked to run, in order.
#[derive(Debug)]
pub struct DryRunStore {
    dialect: Dialect,
    pub statements: Vec<String>,
}

impl DryRunStore {
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            statements: Vec::new(),
        }
    }
}

impl SensorStore for DryRunStore {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn ensure_table(&mut self, table: &str) -> Result<()> {
        let sql = create_table_sql(table);
        info!("[dry-run] {}", sql.replace('\n', " "));
        self.statements.push(sql);
        Ok(())
    }

    fn insert_batch(&mut self, batch: &InsertBatch) -> Result<Option<u64>> {
        let sql = batch.render(self.dialect);
        info!(
            "[dry-run] {} ({} rows into {})",
            sql.chars().take(160).collect::<String>(),
            batch.readings.len(),
            batch.table
        );
        self.statements.push(sql);
        Ok(None)
    }
}
