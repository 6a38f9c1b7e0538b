//! Run command: the whole pipeline over the configured default paths.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use book_freq_core::dataset::save_text;
use book_freq_core::pipeline::{self, CleanReport, CountReport};
use book_freq_core::{BarChart, ChartTarget, Config, DEFAULT_MIN_LENGTH};

use super::parse_positive;
use super::plot::{ChartSettings, print_chart};

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Ignore words shorter than this many characters
    #[arg(long, value_parser = parse_positive)]
    pub min_length: Option<usize>,

    /// Number of words to chart
    #[arg(long, value_parser = parse_positive)]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct RunReport {
    clean: CleanReport,
    count: CountReport,
    chart: BarChart,
}

/// Clean, count and plot using `config.paths`.
#[instrument(name = "cmd_run", skip_all)]
pub fn cmd_run(
    args: RunArgs,
    global_json: bool,
    quiet: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let paths = &config.paths;
    let max_input = config.input_limit();
    let min_length = args
        .min_length
        .or(config.min_length)
        .unwrap_or(DEFAULT_MIN_LENGTH);
    let settings = ChartSettings::resolve(args.limit, None, config.chart_limit, config.chart_width);
    debug!(?paths, min_length, limit = settings.limit, "executing run command");

    let progress = stage_progress(quiet || global_json);

    progress.set_message(format!("cleaning {}", paths.raw_book));
    let clean = pipeline::clean_book(&paths.raw_book, &paths.clean_book, max_input)
        .with_context(|| format!("failed to clean {}", paths.raw_book))?;
    progress.inc(1);

    progress.set_message(format!("counting {}", paths.clean_book));
    let (table, count) =
        pipeline::word_count(&paths.clean_book, &paths.word_counts, min_length, max_input)
            .with_context(|| format!("failed to count words in {}", paths.clean_book))?;
    progress.inc(1);

    progress.set_message("plotting");
    let chart = BarChart::from_table(&table, settings.limit);
    let target = ChartTarget::parse(&paths.chart);
    if let ChartTarget::File(ref path) = target {
        save_text(path, &chart.render_text(settings.width))
            .with_context(|| format!("failed to save chart to {path}"))?;
    }
    progress.inc(1);
    progress.finish_and_clear();
    info!(
        distinct_words = count.distinct_words,
        chart = %paths.chart,
        "pipeline finished"
    );

    if global_json {
        let report = RunReport {
            clean,
            count,
            chart,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {}", "CLEANED:".green(), clean.output);
    println!(
        "{} {} ({} distinct words)",
        "COUNTED:".green(),
        count.output,
        count.distinct_words
    );
    match target {
        ChartTarget::Show => {
            println!();
            print_chart(&chart, settings.width);
        }
        ChartTarget::File(path) => println!("{} {}", "PLOTTED:".green(), path),
    }

    Ok(())
}

/// Three-step progress bar on stderr; hidden when `hidden` is set.
fn stage_progress(hidden: bool) -> ProgressBar {
    let pb = ProgressBar::new(3);
    if hidden {
        pb.set_draw_target(ProgressDrawTarget::hidden());
    }
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
