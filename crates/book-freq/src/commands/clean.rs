//! Clean command: strip Gutenberg boilerplate from a book.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use book_freq_core::pipeline;

/// Arguments for the `clean` subcommand.
#[derive(Args, Debug)]
pub struct CleanArgs {
    /// Raw book to read.
    pub input: Utf8PathBuf,

    /// Where to write the cleaned text.
    pub output: Utf8PathBuf,
}

/// Strip headers and footers from `args.input` and save the body.
#[instrument(name = "cmd_clean", skip_all, fields(input = %args.input, output = %args.output))]
pub fn cmd_clean(
    args: CleanArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!("executing clean command");

    let report = pipeline::clean_book(&args.input, &args.output, max_input_bytes)
        .with_context(|| format!("failed to clean {}", args.input))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.found_body {
        println!(
            "{} {} → {} ({} of {} lines kept)",
            "CLEANED:".green(),
            report.input,
            report.output,
            report.lines_out,
            report.lines_in,
        );
    } else {
        println!(
            "{} no Project Gutenberg markers in {}; wrote empty {}",
            "WARN:".yellow(),
            report.input,
            report.output,
        );
    }

    Ok(())
}
