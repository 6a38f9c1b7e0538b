//! Plot command: bar chart of the most frequent words.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, info, instrument};

use book_freq_core::dataset::save_text;
use book_freq_core::{
    BarChart, ChartTarget, DEFAULT_CHART_LIMIT, DEFAULT_CHART_WIDTH, MAX_CHART_WIDTH, pipeline,
};

use super::{parse_positive, parse_width};

/// Arguments for the `plot` subcommand.
#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Word count CSV produced by `count`.
    pub input: Utf8PathBuf,

    /// Where to save the chart, or `show` to draw it on the terminal.
    pub output: Utf8PathBuf,

    /// Number of words to chart [default: 10]
    #[arg(long, value_parser = parse_positive)]
    pub limit: Option<usize>,

    /// Width of the longest bar in characters, at most 1000 [default: 50]
    #[arg(long, value_parser = parse_width)]
    pub width: Option<usize>,
}

/// Chart settings resolved from arguments and configuration.
#[derive(Debug, Clone, Copy)]
pub struct ChartSettings {
    /// Number of bars.
    pub limit: usize,
    /// Width of the longest bar.
    pub width: usize,
}

impl ChartSettings {
    /// Merge CLI values over config values over built-in defaults.
    ///
    /// The width is clamped to [`MAX_CHART_WIDTH`].
    pub fn resolve(
        limit: Option<usize>,
        width: Option<usize>,
        config_limit: Option<usize>,
        config_width: Option<usize>,
    ) -> Self {
        Self {
            limit: limit.or(config_limit).unwrap_or(DEFAULT_CHART_LIMIT),
            width: width
                .or(config_width)
                .unwrap_or(DEFAULT_CHART_WIDTH)
                .min(MAX_CHART_WIDTH),
        }
    }
}

#[derive(Serialize)]
struct PlotOutput<'a> {
    input: &'a Utf8PathBuf,
    /// `null` when drawn on the terminal.
    output: Option<&'a Utf8PathBuf>,
    #[serde(flatten)]
    chart: &'a BarChart,
}

/// Load a word count CSV and render its top rows.
#[instrument(name = "cmd_plot", skip_all, fields(input = %args.input, output = %args.output))]
pub fn cmd_plot(
    args: PlotArgs,
    global_json: bool,
    config_limit: Option<usize>,
    config_width: Option<usize>,
) -> anyhow::Result<()> {
    let settings = ChartSettings::resolve(args.limit, args.width, config_limit, config_width);
    debug!(limit = settings.limit, width = settings.width, "executing plot command");

    let chart = pipeline::plot_word_counts(&args.input, settings.limit)
        .with_context(|| format!("failed to read word counts from {}", args.input))?;
    let target = ChartTarget::parse(&args.output);

    if let ChartTarget::File(ref path) = target {
        save_text(path, &chart.render_text(settings.width))
            .with_context(|| format!("failed to save chart to {path}"))?;
        info!(path = %path, bars = chart.bars.len(), "chart saved");
    }

    if global_json {
        let output = PlotOutput {
            input: &args.input,
            output: match target {
                ChartTarget::Show => None,
                ChartTarget::File(_) => Some(&args.output),
            },
            chart: &chart,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    match target {
        ChartTarget::Show => print_chart(&chart, settings.width),
        ChartTarget::File(path) => println!(
            "{} {} bars → {}",
            "PLOTTED:".green(),
            chart.bars.len(),
            path
        ),
    }

    Ok(())
}

/// Draw a chart on stdout with colors.
pub fn print_chart(chart: &BarChart, width: usize) {
    println!("{}", chart.title.bold().underline());
    println!();
    println!("{}", chart.axis_header().dimmed());
    if chart.bars.is_empty() {
        println!("{}", "(no words)".dimmed());
    }
    for line in chart.lines(width) {
        println!("{} {} {}", line.label, line.bar.cyan(), line.count.dimmed());
    }
}
