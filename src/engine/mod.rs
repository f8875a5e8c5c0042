//! Engine module: CLI, name sanitizing, freshness filter, CSV translation, database access

pub mod arg_parser;
pub mod cli;
pub mod db_ops;
pub mod freshness;
pub mod sanitize;
pub mod tools;
pub mod translate;

// Re-export commonly used functions
pub use arg_parser::{Cli, Commands, ImportArgs};
pub use cli::{build_opts, handle_run};
pub use db_ops::{DryRunStore, MySqlStore, SensorStore, SqliteStore, dsn_to_url, open_store};
pub use freshness::{Freshness, classify, is_csv, is_fresh, midnight_of};
pub use sanitize::{sanitize_identifier, sensor_prefix, table_name_from_file_name};
pub use tools::{glob_match, is_os_hidden_file, path_relative_to, should_include_in_walk};
pub use translate::{
    Dialect, InsertBatch, create_table_sql, insert_sql, read_records, read_records_from,
    records_to_batch,
};
