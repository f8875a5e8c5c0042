//! DSN lookup for MySQL: env var → .env in the working directory.

use log::debug;
use std::path::Path;

use crate::utils::config::PackagePaths;

fn non_empty(s: String) -> Option<String> {
    let s = s.trim().to_string();
    (!s.is_empty()).then_some(s)
}

/// Read the DSN from `HOMEE_MYSQL_DSN`, falling back to a `.env` file in `dir`.
pub fn dsn_from_env(dir: &Path) -> Option<String> {
    let key = PackagePaths::get().dsn_env_key();
    if let Some(s) = std::env::var(key).ok().and_then(non_empty) {
        debug!("MySQL DSN found in environment");
        return Some(s);
    }
    let env_path = dir.join(".env");
    if env_path.is_file() {
        let _ = dotenvy::from_path(&env_path);
        if let Some(s) = std::env::var(key).ok().and_then(non_empty) {
            debug!("MySQL DSN found in {}", env_path.display());
            return Some(s);
        }
    }
    None
}
