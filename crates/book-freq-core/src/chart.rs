//! Bar chart of the most frequent words.
//!
//! The chart takes the first rows of a [`FrequencyTable`] in table order and
//! lays them out as horizontal text bars scaled to the largest count. The
//! layout is shared by the plain-text file renderer here and the colored
//! terminal renderer in the CLI.

use std::fmt::Write as _;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::counts::FrequencyTable;

/// Number of bars drawn when no limit is configured.
pub const DEFAULT_CHART_LIMIT: usize = 10;

/// Width in characters of the longest bar when no width is configured.
pub const DEFAULT_CHART_WIDTH: usize = 50;

/// Widest bar ever drawn; larger widths are clamped to this.
pub const MAX_CHART_WIDTH: usize = 1000;

/// Output target that means "draw on the terminal" instead of writing a file.
pub const SHOW_TARGET: &str = "show";

const TITLE: &str = "Word Counts";
const X_LABEL: &str = "Word";
const Y_LABEL: &str = "Counts";
const BAR_GLYPH: char = '█';

/// Where a rendered chart goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartTarget {
    /// Draw on the terminal.
    Show,
    /// Write a plain-text chart to this file.
    File(Utf8PathBuf),
}

impl ChartTarget {
    /// Interpret a user-supplied output argument; the literal `show` means
    /// the terminal.
    pub fn parse(output: &Utf8Path) -> Self {
        if output.as_str() == SHOW_TARGET {
            Self::Show
        } else {
            Self::File(output.to_path_buf())
        }
    }
}

/// A single bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bar {
    /// Word on the category axis.
    pub word: String,
    /// Bar height.
    pub count: u64,
}

/// One laid-out chart row, ready to print.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarLine {
    /// Word, right-padded to the widest label.
    pub label: String,
    /// The bar glyphs.
    pub bar: String,
    /// Count printed after the bar.
    pub count: u64,
}

/// Top-N words of a frequency table, in table order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarChart {
    /// Chart title.
    pub title: &'static str,
    /// Category axis caption.
    pub x_label: &'static str,
    /// Value axis caption.
    pub y_label: &'static str,
    /// Bars, most frequent first.
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Take the first `limit` rows of `table`.
    ///
    /// A limit larger than the table keeps every row; an empty table gives a
    /// chart without bars.
    pub fn from_table(table: &FrequencyTable, limit: usize) -> Self {
        let bars = table
            .top(limit)
            .iter()
            .map(|row| Bar {
                word: row.word.clone(),
                count: row.count,
            })
            .collect();
        Self {
            title: TITLE,
            x_label: X_LABEL,
            y_label: Y_LABEL,
            bars,
        }
    }

    /// Largest count among the bars, or 0 without bars.
    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }

    /// Lay out every bar with the longest one `width` glyphs wide.
    ///
    /// `width` is clamped to [`MAX_CHART_WIDTH`]. Non-zero counts always get
    /// at least one glyph.
    pub fn lines(&self, width: usize) -> Vec<BarLine> {
        let width = width.min(MAX_CHART_WIDTH);
        let max = self.max_count();
        let label_width = self.label_width();
        self.bars
            .iter()
            .map(|b| BarLine {
                label: pad(&b.word, label_width),
                bar: BAR_GLYPH.to_string().repeat(scaled(b.count, max, width)),
                count: b.count,
            })
            .collect()
    }

    /// Header row with both axis captions aligned to the bar column.
    pub fn axis_header(&self) -> String {
        format!("{} {}", pad(self.x_label, self.label_width()), self.y_label)
    }

    /// Render the whole chart as plain text.
    pub fn render_text(&self, width: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.axis_header());
        if self.bars.is_empty() {
            let _ = writeln!(out, "(no words)");
        }
        for line in self.lines(width) {
            let _ = writeln!(out, "{} {} {}", line.label, line.bar, line.count);
        }
        out
    }

    fn label_width(&self) -> usize {
        self.bars
            .iter()
            .map(|b| b.word.chars().count())
            .chain(std::iter::once(self.x_label.chars().count()))
            .max()
            .unwrap_or(0)
    }
}

fn pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    let mut padded = s.to_string();
    padded.extend(std::iter::repeat_n(' ', width.saturating_sub(len)));
    padded
}

fn scaled(count: u64, max: u64, width: usize) -> usize {
    if count == 0 || max == 0 || width == 0 {
        return 0;
    }
    let (count, max) = (u128::from(count), u128::from(max));
    let len = (count * width as u128 + max / 2) / max;
    usize::try_from(len).map_or(width, |len| len.clamp(1, width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counts::WordCount;

    fn sample() -> FrequencyTable {
        let words = ["the", "and", "to", "of", "a", "in", "is", "it", "you", "that"];
        let counts = [100, 80, 70, 60, 50, 40, 30, 25, 20, 15];
        FrequencyTable::from_rows(
            words
                .iter()
                .zip(counts)
                .map(|(w, c)| WordCount {
                    word: (*w).to_string(),
                    count: c,
                })
                .collect(),
        )
    }

    #[test]
    fn respects_limit() {
        assert_eq!(BarChart::from_table(&sample(), 3).bars.len(), 3);
        assert_eq!(
            BarChart::from_table(&sample(), DEFAULT_CHART_LIMIT).bars.len(),
            10
        );
    }

    #[test]
    fn limit_beyond_table_keeps_all_rows() {
        let table = FrequencyTable::from_rows(vec![
            WordCount {
                word: "hello".into(),
                count: 5,
            },
            WordCount {
                word: "world".into(),
                count: 3,
            },
        ]);
        assert_eq!(BarChart::from_table(&table, 10).bars.len(), 2);
    }

    #[test]
    fn keeps_table_order() {
        let chart = BarChart::from_table(&sample(), 3);
        let words: Vec<&str> = chart.bars.iter().map(|b| b.word.as_str()).collect();
        assert_eq!(words, ["the", "and", "to"]);
    }

    #[test]
    fn empty_table_renders_without_bars() {
        let chart = BarChart::from_table(&FrequencyTable::default(), 10);
        assert!(chart.bars.is_empty());
        assert_eq!(chart.max_count(), 0);
        let text = chart.render_text(DEFAULT_CHART_WIDTH);
        assert!(text.starts_with("Word Counts\n"));
        assert!(text.contains("(no words)"));
    }

    #[test]
    fn bars_scale_to_width() {
        let chart = BarChart::from_table(&sample(), 2);
        let lines = chart.lines(10);
        assert_eq!(lines[0].bar.chars().count(), 10);
        assert_eq!(lines[1].bar.chars().count(), 8);
    }

    #[test]
    fn huge_widths_are_clamped() {
        let table = FrequencyTable::from_rows(vec![
            WordCount {
                word: "a".into(),
                count: u64::MAX,
            },
            WordCount {
                word: "b".into(),
                count: 100,
            },
        ]);
        let lines = BarChart::from_table(&table, 2).lines(usize::MAX / 2);
        assert_eq!(lines[0].bar.chars().count(), MAX_CHART_WIDTH);
        assert_eq!(lines[1].bar.chars().count(), 1);
    }

    #[test]
    fn small_counts_still_get_a_glyph() {
        let table = FrequencyTable::from_rows(vec![
            WordCount {
                word: "big".into(),
                count: 1000,
            },
            WordCount {
                word: "tiny".into(),
                count: 1,
            },
        ]);
        let lines = BarChart::from_table(&table, 2).lines(10);
        assert_eq!(lines[1].bar.chars().count(), 1);
    }

    #[test]
    fn labels_are_aligned() {
        let chart = BarChart::from_table(&sample(), 4);
        let text = chart.render_text(20);
        assert!(text.contains("Word Counts"));
        assert!(text.contains("Word Counts\n\nWord Counts\n"));
        assert!(text.contains("the  ████████████████████ 100\n"));
        assert!(text.contains("of   ████████████ 60\n"));
    }

    #[test]
    fn show_target_is_literal() {
        assert_eq!(ChartTarget::parse(Utf8Path::new("show")), ChartTarget::Show);
        assert_eq!(
            ChartTarget::parse(Utf8Path::new("out/chart.txt")),
            ChartTarget::File(Utf8PathBuf::from("out/chart.txt"))
        );
        assert_eq!(
            ChartTarget::parse(Utf8Path::new("Show")),
            ChartTarget::File(Utf8PathBuf::from("Show"))
        );
    }
}
