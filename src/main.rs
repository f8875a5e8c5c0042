//! homee_csv_to_mysql CLI: import today's homee CSV exports; --force-all imports everything.

use clap::Parser;
use homee_csv_to_mysql::engine::arg_parser::Cli;
use homee_csv_to_mysql::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let start_time = Instant::now();
    let cli = Cli::parse();
    let code = match handle_run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    };
    log::debug!("Total time: {:?}", start_time.elapsed());
    code
}
