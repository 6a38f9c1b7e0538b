//! File-to-file pipeline stages.
//!
//! Each stage reads its input from disk, runs the in-memory core, and writes
//! its output. They are independent: counting can run on any text, cleaned
//! or not.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::chart::BarChart;
use crate::counts::{FrequencyTable, calculate_word_counts};
use crate::dataset::{load_text, save_text};
use crate::error::DatasetResult;
use crate::frequency_csv::{load_word_counts, save_word_counts};
use crate::strip::strip_headers;

/// Summary of a `clean` run.
#[derive(Debug, Clone, Serialize)]
pub struct CleanReport {
    /// Raw book that was read.
    pub input: Utf8PathBuf,
    /// Cleaned text that was written.
    pub output: Utf8PathBuf,
    /// Lines in the raw book.
    pub lines_in: usize,
    /// Lines in the cleaned text.
    pub lines_out: usize,
    /// Whether anything survived stripping. `false` usually means the input
    /// has no Gutenberg markers.
    pub found_body: bool,
}

/// Summary of a `count` run.
#[derive(Debug, Clone, Serialize)]
pub struct CountReport {
    /// Text that was counted.
    pub input: Utf8PathBuf,
    /// CSV table that was written.
    pub output: Utf8PathBuf,
    /// Minimum token length applied.
    pub min_length: usize,
    /// Number of distinct words.
    pub distinct_words: usize,
    /// Total tokens counted.
    pub total_words: u64,
}

/// Strip Gutenberg boilerplate from `input` and save the body to `output`.
#[tracing::instrument(skip_all, fields(input = %input, output = %output))]
pub fn clean_book(
    input: &Utf8Path,
    output: &Utf8Path,
    max_input_bytes: Option<usize>,
) -> DatasetResult<CleanReport> {
    let lines = load_text(input, max_input_bytes)?;
    let cleaned = strip_headers(&lines);
    save_text(output, &cleaned)?;

    let found_body = !cleaned.is_empty();
    if !found_body {
        tracing::warn!(input = %input, "no gutenberg body found; wrote empty text");
    }

    Ok(CleanReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        lines_in: lines.len(),
        lines_out: cleaned.lines().count(),
        found_body,
    })
}

/// Count word frequencies in `input` and save them to `output` as CSV.
///
/// Returns the table alongside the report so callers can reuse it.
#[tracing::instrument(skip_all, fields(input = %input, output = %output, min_length = min_length))]
pub fn word_count(
    input: &Utf8Path,
    output: &Utf8Path,
    min_length: usize,
    max_input_bytes: Option<usize>,
) -> DatasetResult<(FrequencyTable, CountReport)> {
    let lines = load_text(input, max_input_bytes)?;
    let table = calculate_word_counts(&lines, min_length);
    save_word_counts(output, &table)?;

    let report = CountReport {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        min_length,
        distinct_words: table.len(),
        total_words: table.total(),
    };
    Ok((table, report))
}

/// Load a saved frequency table and build a chart of its first `limit` rows.
#[tracing::instrument(skip_all, fields(input = %input, limit = limit))]
pub fn plot_word_counts(input: &Utf8Path, limit: usize) -> DatasetResult<BarChart> {
    let table = load_word_counts(input)?;
    Ok(BarChart::from_table(&table, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn utf8(tmp: &TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().join(name)).unwrap()
    }

    const BOOK: &str = "Produced by volunteers\n\
*** START OF THE PROJECT GUTENBERG EBOOK TEST ***\n\
\n\
The cat and the hat.\n\
The end.\n\
*** END OF THE PROJECT GUTENBERG EBOOK TEST ***\n\
License text\n";

    #[test]
    fn clean_then_count_then_plot() {
        let tmp = TempDir::new().unwrap();
        let raw = utf8(&tmp, "raw.txt");
        let clean = utf8(&tmp, "processed/book.txt");
        let counts = utf8(&tmp, "analyzed/word_counts.csv");
        fs::write(&raw, BOOK).unwrap();

        let report = clean_book(&raw, &clean, None).unwrap();
        assert!(report.found_body);
        assert_eq!(report.lines_in, 7);
        assert_eq!(report.lines_out, 2);
        assert_eq!(
            fs::read_to_string(&clean).unwrap(),
            "The cat and the hat.\nThe end."
        );

        let (table, report) = word_count(&clean, &counts, 1, None).unwrap();
        assert_eq!(report.distinct_words, 5);
        assert_eq!(report.total_words, 7);
        assert_eq!(table.rows()[0].word, "the");
        assert_eq!(table.rows()[0].count, 3);
        assert!(
            fs::read_to_string(&counts)
                .unwrap()
                .starts_with("word,count\nthe,3\n")
        );

        let chart = plot_word_counts(&counts, 2).unwrap();
        assert_eq!(chart.bars.len(), 2);
        assert_eq!(chart.bars[0].word, "the");
    }

    #[test]
    fn clean_without_markers_writes_empty_file() {
        let tmp = TempDir::new().unwrap();
        let raw = utf8(&tmp, "raw.txt");
        let clean = utf8(&tmp, "clean.txt");
        fs::write(&raw, "just\nsome\ntext\n").unwrap();

        let report = clean_book(&raw, &clean, None).unwrap();
        assert!(!report.found_body);
        assert_eq!(report.lines_out, 0);
        assert_eq!(fs::read_to_string(&clean).unwrap(), "");
    }

    #[test]
    fn word_count_applies_min_length() {
        let tmp = TempDir::new().unwrap();
        let input = utf8(&tmp, "in.txt");
        let output = utf8(&tmp, "out.csv");
        fs::write(&input, "a bb ccc dddd\n").unwrap();

        let (table, report) = word_count(&input, &output, 3, None).unwrap();
        assert_eq!(report.min_length, 3);
        assert_eq!(table.len(), 2);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "word,count\nccc,1\ndddd,1\n"
        );
    }

    #[test]
    fn empty_input_writes_header_only() {
        let tmp = TempDir::new().unwrap();
        let input = utf8(&tmp, "empty.txt");
        let output = utf8(&tmp, "out.csv");
        fs::write(&input, "").unwrap();

        let (table, _report) = word_count(&input, &output, 1, None).unwrap();
        assert!(table.is_empty());
        assert_eq!(fs::read_to_string(&output).unwrap(), "word,count\n");
    }

    #[test]
    fn missing_input_fails_without_writing_output() {
        let tmp = TempDir::new().unwrap();
        let input = utf8(&tmp, "missing.txt");
        let output = utf8(&tmp, "out.csv");

        assert!(word_count(&input, &output, 1, None).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn clean_handles_carriage_return_endings() {
        let tmp = TempDir::new().unwrap();
        let raw = utf8(&tmp, "raw.txt");
        let clean = utf8(&tmp, "clean.txt");
        fs::write(&raw, BOOK.replace('\n', "\r")).unwrap();

        let report = clean_book(&raw, &clean, None).unwrap();
        assert!(report.found_body);
        assert_eq!(report.lines_in, 7);
        assert_eq!(
            fs::read_to_string(&clean).unwrap(),
            "The cat and the hat.\nThe end."
        );
    }

    #[test]
    fn reports_serialize_with_plain_paths() {
        let report = CountReport {
            input: Utf8PathBuf::from("data/processed/book.txt"),
            output: Utf8PathBuf::from("data/analyzed/word_counts.csv"),
            min_length: 2,
            distinct_words: 10,
            total_words: 42,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["input"], "data/processed/book.txt");
        assert_eq!(json["total_words"], 42);
    }
}
