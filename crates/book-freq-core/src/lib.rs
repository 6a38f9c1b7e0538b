//! Core library for book-freq.
//!
//! This crate provides the text pipeline used by the `book-freq` CLI and any
//! downstream consumers: Project Gutenberg boilerplate removal, word
//! frequency counting, CSV persistence and a text bar chart.
//!
//! # Modules
//!
//! - [`strip`] - Header/footer removal
//! - [`counts`] - Tokenization and frequency tables
//! - [`dataset`] - Whole-file text I/O
//! - [`frequency_csv`] - Frequency table CSV I/O
//! - [`chart`] - Top-N bar chart
//! - [`pipeline`] - File-to-file stages
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use book_freq_core::{calculate_word_counts, strip_headers};
//!
//! let lines = [
//!     "Preamble",
//!     "*** START OF THE PROJECT GUTENBERG EBOOK X ***",
//!     "Hello, hello world!",
//!     "*** END OF THE PROJECT GUTENBERG EBOOK X ***",
//! ];
//! let body = strip_headers(lines);
//! assert_eq!(body, "Hello, hello world!");
//!
//! let table = calculate_word_counts(body.lines(), 1);
//! assert_eq!(table.get("hello"), Some(2));
//! ```
#![deny(unsafe_code)]

pub mod chart;
pub mod config;
pub mod counts;
pub mod dataset;
pub mod error;
pub mod frequency_csv;
pub mod pipeline;
pub mod strip;

pub use chart::{BarChart, ChartTarget, DEFAULT_CHART_LIMIT, DEFAULT_CHART_WIDTH, MAX_CHART_WIDTH};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel, PathsConfig};
pub use counts::{DEFAULT_MIN_LENGTH, DELIMITERS, FrequencyTable, WordCount, calculate_word_counts};
pub use dataset::DEFAULT_MAX_INPUT_BYTES;
pub use error::{ConfigError, ConfigResult, DatasetError, DatasetResult};
pub use strip::{GUTENBERG_MARKER, strip_headers};
