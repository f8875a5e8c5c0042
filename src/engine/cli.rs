//! CLI command handler: merge config file, environment and flags, then run the import.

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::Path;

use crate::engine::arg_parser::{Cli, Commands, ImportArgs};
use crate::pipeline::{check_for_failures, report_summary};
use crate::utils::app_toml::{apply_file_to_opts, load_app_toml};
use crate::utils::{PackagePaths, dsn_from_env, setup_logging};
use crate::{Opts, Target};

/// Build opts with precedence defaults < config file < environment < flags.
/// `cwd` is where the default config file and `.env` are looked up.
pub fn build_opts(args: &ImportArgs, cwd: &Path) -> Result<Opts> {
    let mut opts = Opts::default();

    let config_path = match &args.config {
        Some(p) if !p.is_file() => bail!("config file {} not found", p.display()),
        Some(p) => p.clone(),
        None => cwd.join(PackagePaths::get().config_filename()),
    };
    if let Some(file) = load_app_toml(&config_path) {
        debug!("Loaded config from {}", config_path.display());
        apply_file_to_opts(&file, &mut opts);
    }

    if !matches!(opts.target, Some(Target::Sqlite(_)))
        && let Some(dsn) = dsn_from_env(cwd)
    {
        opts.target = Some(Target::MySql(dsn));
    }

    if let Some(ref dir) = args.input_dir {
        opts.input_dir = Some(dir.clone());
    }
    if let Some(ref dsn) = args.mysql_dsn {
        opts.target = Some(Target::MySql(dsn.clone()));
    }
    if let Some(ref p) = args.sqlite_db {
        opts.target = Some(Target::Sqlite(p.clone()));
    }
    if let Some(v) = args.force_all {
        opts.force_all = v;
    }
    if let Some(v) = args.dry_run {
        opts.dry_run = v;
    }
    if let Some(v) = args.strict {
        opts.strict = v;
    }
    if let Some(v) = args.follow_links {
        opts.follow_links = v;
    }
    if !args.exclude.is_empty() {
        opts.exclude = args.exclude.clone();
    }
    opts.verbose = args.verbose.unwrap_or(false);
    Ok(opts)
}

fn handle_import(args: &ImportArgs) -> Result<()> {
    setup_logging(args.verbose.unwrap_or(false));
    let cwd = std::env::current_dir().context("read current directory")?;
    let opts = build_opts(args, &cwd)?;

    let Some(root) = opts.input_dir.clone() else {
        bail!("no input directory; pass --input-dir or set input_dir in the config file");
    };
    if opts.dry_run {
        warn!("RUNNING IN DRY-RUN MODE. NOTHING WILL BE WRITTEN TO THE DATABASE.");
    }

    info!("Starting import");
    let summary = crate::import_dir(&root, &opts)?;
    report_summary(&summary, &opts);
    check_for_failures(&summary)
}

/// Dispatch the parsed command line.
pub fn handle_run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Import(args) => handle_import(args),
    }
}
