//! CSV-to-SQL translation: parse a homee export and build one duplicate-ignoring bulk insert per file.

use anyhow::{Context, Result};
use log::warn;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::Reading;
use crate::utils::config::{DB_INSERT_BATCH_SIZE, FIELDS_PER_ROW};

/// SQL flavour of the target database. Only the duplicate-ignore keyword differs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dialect {
    MySql,
    Sqlite,
}

impl Dialect {
    fn insert_ignore(self) -> &'static str {
        match self {
            Dialect::MySql => "INSERT IGNORE INTO",
            Dialect::Sqlite => "INSERT OR IGNORE INTO",
        }
    }
}

/// Idempotent schema statement for one sensor table.
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {table} (\n    \
            homee_ts TIMESTAMP NOT NULL PRIMARY KEY,\n    \
            val DECIMAL(10,2) NOT NULL DEFAULT 0.0\n)"
    )
}

fn insert_head(dialect: Dialect, table: &str) -> String {
    format!("{} {table} (homee_ts, val) VALUES ", dialect.insert_ignore())
}

/// Parameterized insert for `rows` readings: `... VALUES (?, ?),(?, ?)`.
pub fn insert_sql(dialect: Dialect, table: &str, rows: usize) -> String {
    let tuples = vec!["(?, ?)"; rows].join(",");
    insert_head(dialect, table) + &tuples
}

/// Parse a headerless CSV export into raw rows. Rows keep whatever field count they have.
pub fn read_records_from<R: Read>(rdr: R) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(rdr);
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("parse CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Open and fully read one CSV file.
pub fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    read_records_from(file).with_context(|| format!("read {}", path.display()))
}

/// Valid readings of one file, ready to insert into `table`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InsertBatch {
    pub table: String,
    /// Valid rows in input order.
    pub readings: Vec<Reading>,
    /// Rows dropped for having a field count other than two.
    pub dropped: usize,
}

impl InsertBatch {
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Readings split into execution-sized chunks.
    pub fn chunks(&self) -> std::slice::Chunks<'_, Reading> {
        self.readings.chunks(DB_INSERT_BATCH_SIZE)
    }

    /// Literal statement text: timestamp quoted verbatim, value unquoted. For logs and dry runs;
    /// execution binds values through [`insert_sql`] instead.
    pub fn render(&self, dialect: Dialect) -> String {
        let tuples: Vec<String> = self
            .readings
            .iter()
            .map(|r| format!("('{}', {})", r.timestamp, r.value))
            .collect();
        insert_head(dialect, &self.table) + &tuples.join(",")
    }
}

/// Keep rows with exactly two fields, in order; warn about and count the rest.
pub fn records_to_batch(table: &str, records: &[Vec<String>]) -> InsertBatch {
    let mut readings = Vec::with_capacity(records.len());
    let mut dropped = 0_usize;
    for (i, row) in records.iter().enumerate() {
        match row.as_slice() {
            [timestamp, value] => readings.push(Reading {
                timestamp: timestamp.clone(),
                value: value.clone(),
            }),
            _ => {
                warn!(
                    "{}: skipping invalid record {} {:?} (expected {} fields, found {})",
                    table,
                    i + 1,
                    row,
                    FIELDS_PER_ROW,
                    row.len()
                );
                dropped += 1;
            }
        }
    }
    InsertBatch {
        table: table.to_string(),
        readings,
        dropped,
    }
}
