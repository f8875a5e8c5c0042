//! Pipeline components: walk, per-file import, failure reporting.

pub mod error_handler;
pub mod orchestrator;
pub mod walk;

pub use error_handler::{check_for_failures, report_summary};
pub use orchestrator::{import_file, import_tree};
pub use walk::{WalkOutcome, to_outcome_walkdir, walk_iter};
