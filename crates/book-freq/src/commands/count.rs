//! Count command: word frequencies to CSV.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use book_freq_core::{DEFAULT_MIN_LENGTH, pipeline};

use super::parse_positive;

/// Arguments for the `count` subcommand.
#[derive(Args, Debug)]
pub struct CountArgs {
    /// Text file to count.
    pub input: Utf8PathBuf,

    /// Where to write the `word,count` CSV.
    pub output: Utf8PathBuf,

    /// Ignore words shorter than this many characters [default: 1]
    #[arg(value_parser = parse_positive)]
    pub min_length: Option<usize>,
}

/// Count words in `args.input` and write the frequency table.
#[instrument(name = "cmd_count", skip_all, fields(input = %args.input, output = %args.output))]
pub fn cmd_count(
    args: CountArgs,
    global_json: bool,
    config_min_length: Option<usize>,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let min_length = args
        .min_length
        .or(config_min_length)
        .unwrap_or(DEFAULT_MIN_LENGTH);
    debug!(min_length, "executing count command");

    let (table, report) =
        pipeline::word_count(&args.input, &args.output, min_length, max_input_bytes)
            .with_context(|| format!("failed to count words in {}", args.input))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} distinct words ({} total) → {}",
        "COUNTED:".green(),
        report.distinct_words,
        report.total_words,
        report.output,
    );
    if let Some(top) = table.rows().first() {
        println!("{}: {} ({})", "Most frequent".dimmed(), top.word.bold(), top.count);
    }

    Ok(())
}
