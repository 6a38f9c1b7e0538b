//! Info command: version and effective configuration.

use book_freq_core::config::{Config, ConfigSources, PathsConfig};
use book_freq_core::{DEFAULT_CHART_LIMIT, DEFAULT_CHART_WIDTH, DEFAULT_MIN_LENGTH};
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

/// Arguments for the `info` subcommand.
#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    // only the global flags apply
}

#[derive(Serialize)]
struct PackageInfo {
    name: &'static str,
    version: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    description: &'static str,
    #[serde(skip_serializing_if = "str::is_empty")]
    license: &'static str,
}

impl PackageInfo {
    const CURRENT: Self = Self {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        description: env!("CARGO_PKG_DESCRIPTION"),
        license: env!("CARGO_PKG_LICENSE"),
    };
}

/// Effective settings, with built-in defaults filled in.
#[derive(Serialize)]
struct ConfigInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    config_file: Option<String>,
    log_level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_dir: Option<String>,
    min_length: usize,
    chart_limit: usize,
    chart_width: usize,
    /// `null` when the input limit is disabled.
    max_input_bytes: Option<usize>,
    paths: PathsConfig,
}

impl ConfigInfo {
    fn from_config(config: &Config, sources: &ConfigSources) -> Self {
        Self {
            config_file: sources.primary_file().map(|p| p.to_string()),
            log_level: config.log_level.as_str().to_string(),
            log_dir: config.log_dir.as_ref().map(|p| p.to_string()),
            min_length: config.min_length.unwrap_or(DEFAULT_MIN_LENGTH),
            chart_limit: config.chart_limit.unwrap_or(DEFAULT_CHART_LIMIT),
            chart_width: config.chart_width.unwrap_or(DEFAULT_CHART_WIDTH),
            max_input_bytes: config.input_limit(),
            paths: config.paths.clone(),
        }
    }
}

#[derive(Serialize)]
struct FullInfo {
    #[serde(flatten)]
    package: PackageInfo,
    config: ConfigInfo,
}

/// Print the package version and every setting after defaults are applied,
/// naming the config file that won.
#[instrument(name = "cmd_info", skip_all, fields(json_output))]
pub fn cmd_info(
    _args: InfoArgs,
    global_json: bool,
    config: &Config,
    sources: &ConfigSources,
) -> anyhow::Result<()> {
    debug!(json_output = global_json, "executing info command");
    let full_info = FullInfo {
        package: PackageInfo::CURRENT,
        config: ConfigInfo::from_config(config, sources),
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&full_info)?);
        return Ok(());
    }

    let FullInfo { package, config } = &full_info;
    println!("{} {}", package.name.bold(), package.version.green());
    if !package.description.is_empty() {
        println!("{}", package.description);
    }
    if !package.license.is_empty() {
        row("License", package.license);
    }

    heading("Configuration");
    match &config.config_file {
        Some(path) => row("Config file", path.cyan()),
        None => row("Config file", "none loaded".yellow()),
    }
    row("Log level", &config.log_level);
    if let Some(dir) = &config.log_dir {
        row("Log directory", dir);
    }
    row("Min word length", config.min_length);
    row("Chart bars", config.chart_limit);
    row("Chart width", config.chart_width);
    match config.max_input_bytes {
        Some(limit) => row("Input limit", format!("{limit} bytes")),
        None => row("Input limit", "disabled".yellow()),
    }

    heading("Pipeline Paths");
    let paths = &config.paths;
    row("Raw book", &paths.raw_book);
    row("Clean book", &paths.clean_book);
    row("Word counts", &paths.word_counts);
    row("Chart", &paths.chart);

    Ok(())
}

fn heading(title: &str) {
    println!();
    println!("{}", title.bold().underline());
}

fn row(label: &str, value: impl std::fmt::Display) {
    println!("{}: {value}", label.dimmed());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_info_text_succeeds() {
        let sources = ConfigSources::default();
        assert!(cmd_info(InfoArgs::default(), false, &Config::default(), &sources).is_ok());
    }

    #[test]
    fn test_cmd_info_json_via_global() {
        let sources = ConfigSources::default();
        assert!(cmd_info(InfoArgs::default(), true, &Config::default(), &sources).is_ok());
    }

    #[test]
    fn test_config_info_fills_defaults() {
        let info = ConfigInfo::from_config(&Config::default(), &ConfigSources::default());
        assert!(info.config_file.is_none());
        assert_eq!(info.log_level, "info");
        assert_eq!(info.min_length, DEFAULT_MIN_LENGTH);
        assert_eq!(info.chart_limit, DEFAULT_CHART_LIMIT);
        assert_eq!(info.max_input_bytes, Some(book_freq_core::DEFAULT_MAX_INPUT_BYTES));
    }

    #[test]
    fn test_config_info_disabled_limit() {
        let config = Config {
            disable_input_limit: true,
            ..Config::default()
        };
        let info = ConfigInfo::from_config(&config, &ConfigSources::default());
        assert_eq!(info.max_input_bytes, None);
    }
}
