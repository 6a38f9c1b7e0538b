//! book-freq CLI
#![deny(unsafe_code)]

use anyhow::Context;
use book_freq::{Cli, Commands, commands};
use book_freq_core::config::{Config, ConfigLoader, ConfigSources};
use camino::Utf8PathBuf;
use clap::Parser;
use tracing::debug;

mod observability;

/// Exit status for usage errors (missing or malformed arguments).
const USAGE_EXIT_CODE: i32 = 1;

fn main() -> anyhow::Result<()> {
    let cli = Cli::try_parse().unwrap_or_else(|err| {
        // --help and --version also arrive here; they go to stdout and succeed
        let code = if err.use_stderr() { USAGE_EXIT_CODE } else { 0 };
        let _ = err.print();
        std::process::exit(code);
    });
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(dir) = &cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }
    let (config, sources) = load_config(cli.config.clone())?;

    let log_dir = config.log_dir.as_ref().map(|d| d.as_std_path().to_path_buf());
    let level = cli.log_level.unwrap_or(config.log_level);
    let _guard = observability::init_observability(
        &observability::ObservabilityConfig::from_env_with_overrides(log_dir),
        observability::env_filter(cli.quiet, cli.verbose, level.as_str()),
    )
    .context("failed to initialize logging")?;
    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        config_file = ?sources.primary_file(),
        "CLI initialized"
    );

    let json = cli.json;
    let max_input = config.input_limit();
    let result = match command {
        Commands::Clean(args) => commands::clean::cmd_clean(args, json, max_input),
        Commands::Count(args) => {
            commands::count::cmd_count(args, json, config.min_length, max_input)
        }
        Commands::Plot(args) => {
            commands::plot::cmd_plot(args, json, config.chart_limit, config.chart_width)
        }
        Commands::Run(args) => commands::run::cmd_run(args, json, cli.quiet, &config),
        Commands::Info(args) => commands::info::cmd_info(args, json, &config, &sources),
    };
    if let Err(err) = &result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}

/// Discover project config from the working directory, then apply `--config`.
fn load_config(explicit: Option<std::path::PathBuf>) -> anyhow::Result<(Config, ConfigSources)> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = utf8(cwd, "current directory")?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(path) = explicit {
        loader = loader.with_file(utf8(path, "config path")?);
    }
    loader.load().context("failed to load configuration")
}

fn utf8(path: std::path::PathBuf, what: &str) -> anyhow::Result<Utf8PathBuf> {
    Utf8PathBuf::from_path_buf(path)
        .map_err(|p| anyhow::anyhow!("{what} is not valid UTF-8: {}", p.display()))
}
