pub mod app_toml;
pub mod config;
pub mod dsn;
pub mod logger;

pub use config::*;
pub use dsn::dsn_from_env;
pub use logger::{Colors, setup_logging};
