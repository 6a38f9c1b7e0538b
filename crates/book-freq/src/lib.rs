//! Argument parsing and command implementations for `book-freq`.
//!
//! The binary in `main.rs` only loads configuration, sets up logging and
//! dispatches; everything it parses is defined here so `xtask` can render man
//! pages and completions from [`command()`] and tests can drive [`Cli`]
//! without a subprocess.

pub mod commands;

use book_freq_core::LogLevel;
use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;

/// `--color` setting.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Color when stdout supports it.
    #[default]
    Auto,
    /// Color even when piped.
    Always,
    /// Plain text.
    Never,
}

impl ColorChoice {
    /// Set the process-wide `owo-colors` override.
    pub fn apply(self) {
        match self {
            Self::Auto => owo_colors::set_override(std::io::stdout().is_terminal()),
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG                   Log filter (e.g., debug, book_freq=trace)
    BOOK_FREQ_LOG_PATH         Explicit log file path
    BOOK_FREQ_LOG_DIR          Log directory
    BOOK_FREQ_MIN_LENGTH       Default minimum word length for `count`
    BOOK_FREQ_PATHS__RAW_BOOK  Raw book used by `run` (likewise CLEAN_BOOK, WORD_COUNTS, CHART)
";

/// Root parser for `book-freq`.
#[derive(Parser)]
#[command(name = "book-freq")]
#[command(
    about = "Strip Project Gutenberg boilerplate, count word frequencies, chart the top words",
    long_about = None
)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// Pipeline stage or utility to run.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print the bare version number and exit
    #[arg(long)]
    pub version_only: bool,

    /// Extra config file, merged over discovered ones
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Change to DIR before resolving paths and config
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Log errors only; also hides the `run` progress bar
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log level for stderr output (overrides config; `-q`/`-v` win over it)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// When to color terminal output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Print command reports as JSON on stdout
    #[arg(long, global = true)]
    pub json: bool,
}

/// Pipeline stages plus `run` and `info`.
#[derive(Subcommand)]
pub enum Commands {
    /// Strip Project Gutenberg headers and footers from a book
    Clean(commands::clean::CleanArgs),

    /// Count word frequencies and save them as CSV
    Count(commands::count::CountArgs),

    /// Chart the most frequent words from a word count CSV
    Plot(commands::plot::PlotArgs),

    /// Clean, count and plot using the configured default paths
    Run(commands::run::RunArgs),

    /// Show version and the effective configuration
    Info(commands::info::InfoArgs),
}

/// The clap command tree, for man pages and completions.
pub fn command() -> clap::Command {
    Cli::command()
}
