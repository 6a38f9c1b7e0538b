//! Word tokenization and frequency counting.
//!
//! Each line has its punctuation replaced by spaces, is split on whitespace,
//! and every fragment is lower-cased. Fragments shorter than the minimum
//! length are dropped before counting.
//!
//! The resulting [`FrequencyTable`] is ordered by count, highest first.
//! Words with equal counts keep the order in which they were first seen.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Characters treated as word separators, in addition to whitespace.
pub const DELIMITERS: &[char] = &[
    '.', ',', ';', ':', '?', '$', '@', '^', '<', '>', '#', '%', '`', '!', '*', '-', '=', '(', ')',
    '[', ']', '{', '}', '/', '\\', '"', '\'',
];

/// Default minimum token length (keeps every token).
pub const DEFAULT_MIN_LENGTH: usize = 1;

/// Returns `true` if `c` is one of the [`DELIMITERS`].
pub fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// One row of a frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The normalized token.
    pub word: String,
    /// Number of occurrences.
    pub count: u64,
}

/// Distinct words and their counts, ordered by count descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    rows: Vec<WordCount>,
}

impl FrequencyTable {
    /// Build a table from rows that are already in the desired order.
    ///
    /// Used when reading a table back from disk, where the file's order is
    /// authoritative.
    pub const fn from_rows(rows: Vec<WordCount>) -> Self {
        Self { rows }
    }

    /// All rows in table order.
    pub fn rows(&self) -> &[WordCount] {
        &self.rows
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of tokens counted.
    pub fn total(&self) -> u64 {
        self.rows.iter().map(|r| r.count).sum()
    }

    /// Count for a single word, if present.
    pub fn get(&self, word: &str) -> Option<u64> {
        self.rows.iter().find(|r| r.word == word).map(|r| r.count)
    }

    /// The first `limit` rows.
    pub fn top(&self, limit: usize) -> &[WordCount] {
        &self.rows[..limit.min(self.rows.len())]
    }
}

/// Returns `true` for whitespace: Unicode `White_Space` plus the ASCII
/// information separators `\x1c`..`\x1f`.
fn is_space(c: char) -> bool {
    c.is_whitespace() || matches!(c, '\u{1c}'..='\u{1f}')
}

/// Split a single line into normalized tokens of at least `min_length` chars.
pub fn tokenize_line(line: &str, min_length: usize) -> impl Iterator<Item = String> + '_ {
    line.split(|c: char| is_space(c) || is_delimiter(c))
        .filter(|fragment| !fragment.is_empty())
        .map(|fragment| fragment.to_lowercase().trim().to_string())
        .filter(move |token| !token.is_empty() && token.chars().count() >= min_length)
}

/// Count word frequencies across all `lines`.
///
/// Counting is case-insensitive. Tokens shorter than `min_length` chars
/// never appear in the result; a `min_length` of 0 behaves like 1.
#[tracing::instrument(skip(lines))]
pub fn calculate_word_counts<I, S>(lines: I, min_length: usize) -> FrequencyTable
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<WordCount> = Vec::new();

    for line in lines {
        for token in tokenize_line(line.as_ref(), min_length) {
            if let Some(&i) = index.get(&token) {
                rows[i].count += 1;
            } else {
                index.insert(token.clone(), rows.len());
                rows.push(WordCount {
                    word: token,
                    count: 1,
                });
            }
        }
    }

    // Stable sort: equal counts stay in first-seen order.
    rows.sort_by(|a, b| b.count.cmp(&a.count));

    tracing::debug!(distinct = rows.len(), "counted words");
    FrequencyTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_pairs(table: &FrequencyTable) -> Vec<(&str, u64)> {
        table
            .rows()
            .iter()
            .map(|r| (r.word.as_str(), r.count))
            .collect()
    }

    #[test]
    fn simple_word_count() {
        let table = calculate_word_counts(["hello world", "hello there", "world peace"], 1);
        assert_eq!(
            as_pairs(&table),
            vec![("hello", 2), ("world", 2), ("there", 1), ("peace", 1)]
        );
    }

    #[test]
    fn case_insensitive() {
        let table = calculate_word_counts(["Hello", "HELLO", "hello"], 1);
        assert_eq!(as_pairs(&table), vec![("hello", 3)]);

        let table = calculate_word_counts(["Hello HELLO hello", "World WORLD world"], 1);
        assert_eq!(table.get("hello"), Some(3));
        assert_eq!(table.get("world"), Some(3));
    }

    #[test]
    fn delimiters_split_words() {
        let table = calculate_word_counts(["hello,world!", "test.data?", "my-word(test)"], 1);
        assert_eq!(
            as_pairs(&table),
            vec![
                ("test", 2),
                ("hello", 1),
                ("world", 1),
                ("data", 1),
                ("my", 1),
                ("word", 1),
            ]
        );
    }

    #[test]
    fn tokens_never_contain_delimiters() {
        let line: String = DELIMITERS.iter().flat_map(|d| ['x', *d]).collect();
        let table = calculate_word_counts([line.as_str()], 1);
        assert_eq!(as_pairs(&table), vec![("x", DELIMITERS.len() as u64)]);
        for row in table.rows() {
            assert!(!row.word.contains(DELIMITERS));
        }
    }

    #[test]
    fn control_separators_split_words() {
        let table = calculate_word_counts(["a\u{1f}b\u{1c}c", "a\u{a0}b\tc"], 1);
        assert_eq!(as_pairs(&table), vec![("a", 2), ("b", 2), ("c", 2)]);
    }

    #[test]
    fn min_length_filters_short_tokens() {
        let table = calculate_word_counts(["a bb ccc dddd"], 3);
        assert_eq!(table.get("a"), None);
        assert_eq!(table.get("bb"), None);
        assert_eq!(table.get("ccc"), Some(1));
        assert_eq!(table.get("dddd"), Some(1));
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        let table = calculate_word_counts(["été ça"], 3);
        assert_eq!(as_pairs(&table), vec![("été", 1)]);
    }

    #[test]
    fn zero_min_length_keeps_everything() {
        let table = calculate_word_counts(["a bb"], 0);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn whitespace_runs_are_collapsed() {
        let table = calculate_word_counts(["  hello   world  ", "\t\ntest\r\n"], 1);
        assert_eq!(
            as_pairs(&table),
            vec![("hello", 1), ("world", 1), ("test", 1)]
        );
    }

    #[test]
    fn delimiter_only_line_contributes_nothing() {
        let table = calculate_word_counts(["... --- !!!", "   "], 1);
        assert!(table.is_empty());
    }

    #[test]
    fn empty_input_gives_empty_table() {
        let table = calculate_word_counts(Vec::<&str>::new(), 1);
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let table = calculate_word_counts(["zeta alpha mid", "alpha zeta", "beta"], 1);
        assert_eq!(
            as_pairs(&table),
            vec![("zeta", 2), ("alpha", 2), ("mid", 1), ("beta", 1)]
        );
    }

    #[test]
    fn underscores_and_digits_are_not_delimiters() {
        let table = calculate_word_counts(["snake_case 42 42"], 1);
        assert_eq!(as_pairs(&table), vec![("42", 2), ("snake_case", 1)]);
    }

    #[test]
    fn table_accessors() {
        let table = calculate_word_counts(["a a a b b c"], 1);
        assert_eq!(table.total(), 6);
        assert_eq!(table.top(2).len(), 2);
        assert_eq!(table.top(99).len(), 3);
        assert_eq!(table.top(0).len(), 0);
        assert_eq!(table.top(1)[0].word, "a");
    }
}
