//! Logging setup: human-readable stderr output plus optional JSONL file logs.
//!
//! File logging is opt-in. It turns on when `BOOK_FREQ_LOG_PATH` names a
//! file, when `BOOK_FREQ_LOG_DIR` names a directory, or when the config sets
//! `log_dir`. Stderr logging is always on and filtered by `RUST_LOG` or the
//! `-q`/`-v` flags.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

const ENV_LOG_PATH: &str = "BOOK_FREQ_LOG_PATH";
const ENV_LOG_DIR: &str = "BOOK_FREQ_LOG_DIR";
const DEFAULT_LOG_FILE: &str = "book-freq.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFile {
    /// A single file that is appended to.
    Path(PathBuf),
    /// A directory holding daily-rotated files.
    Dir(PathBuf),
}

/// Resolved observability settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// File log destination; `None` disables file logging.
    pub log_file: Option<LogFile>,
}

impl ObservabilityConfig {
    /// Read settings from the environment, falling back to `config_log_dir`.
    ///
    /// `BOOK_FREQ_LOG_PATH` wins over `BOOK_FREQ_LOG_DIR`, which wins over the
    /// config value.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            non_empty_env(ENV_LOG_PATH),
            non_empty_env(ENV_LOG_DIR),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = env_path
            .map(LogFile::Path)
            .or_else(|| env_dir.or(config_dir).map(LogFile::Dir));
        Self { log_file }
    }
}

fn non_empty_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Build the log filter.
///
/// `RUST_LOG` takes precedence. Otherwise `--quiet` selects `error`, `-v`
/// selects `debug` and `-vv` or more selects `trace`. Without any of these,
/// `level` is used as is.
pub fn env_filter(quiet: bool, verbose: u8, level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(directive(quiet, verbose, level))
}

fn directive(quiet: bool, verbose: u8, level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// life of the process.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match &config.log_file {
        Some(dest) => {
            let appender = file_appender(dest)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .with_current_span(true)
                .with_span_list(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("a global tracing subscriber is already installed")?;

    Ok(guard)
}

fn file_appender(dest: &LogFile) -> anyhow::Result<rolling::RollingFileAppender> {
    match dest {
        LogFile::Path(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            create_dir(dir)?;
            Ok(rolling::never(dir, name))
        }
        LogFile::Dir(dir) => {
            create_dir(dir)?;
            Ok(rolling::daily(dir, DEFAULT_LOG_FILE))
        }
    }
}

fn create_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))
}
