//! Application configuration constants.
//! Names, limits and batch sizes in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    config_filename: String,
    dsn_env_key: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                config_filename: format!(".{pkg}.toml"),
                dsn_env_key: DSN_ENV_KEY.to_string(),
            }
        })
    }

    /// Config file looked up in the current directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Environment variable (or `.env` key) holding the MySQL DSN.
    pub fn dsn_env_key(&self) -> &str {
        &self.dsn_env_key
    }
}

const DSN_ENV_KEY: &str = "HOMEE_MYSQL_DSN";

// ---- Input files ----

/// Only files whose name ends with this (case-sensitive) are imported.
pub const CSV_SUFFIX: &str = ".csv";

/// Fields per valid CSV row: timestamp, value.
pub const FIELDS_PER_ROW: usize = 2;

// ---- Database ----

/// Longest table name MySQL accepts.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Rows per executed INSERT. Keeps placeholder counts under the MySQL (65535) and SQLite (32766) limits.
pub const DB_INSERT_BATCH_SIZE: usize = 1000;

/// Default MySQL endpoint when a driver-style DSN names no address.
pub const DEFAULT_MYSQL_ADDR: &str = "127.0.0.1:3306";
