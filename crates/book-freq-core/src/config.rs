//! Layered configuration.
//!
//! Settings are merged from, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. the user config, `config.<ext>` in the platform config dir
//!    (`~/.config/book-freq/` on Linux)
//! 3. project config: `.book-freq.<ext>` then `book-freq.<ext>` from the
//!    closest directory at or above the search root that has any
//! 4. files passed explicitly (`--config`)
//! 5. `BOOK_FREQ_*` environment variables, `__` separating nested keys
//!
//! `<ext>` is `toml`, `yaml`, `yml` or `json`; within one directory they merge
//! in that order. The upward search stops at a directory containing `.git`.
//!
//! ```no_run
//! use camino::Utf8PathBuf;
//! use book_freq_core::config::ConfigLoader;
//!
//! let cwd = Utf8PathBuf::try_from(std::env::current_dir()?)?;
//! let (config, sources) = ConfigLoader::new().with_project_search(&cwd).load()?;
//! println!("raw book: {}", config.paths.raw_book);
//! println!("from: {:?}", sources.primary_file());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

const APP_NAME: &str = "book-freq";
const ENV_PREFIX: &str = "BOOK_FREQ_";
const PROJECT_BOUNDARY: &str = ".git";

/// Default file locations for each pipeline stage.
///
/// Relative paths resolve against the working directory of the process.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathsConfig {
    /// Raw book as downloaded, boilerplate included.
    pub raw_book: Utf8PathBuf,
    /// Book body with headers and footers removed.
    pub clean_book: Utf8PathBuf,
    /// Word frequency table (CSV).
    pub word_counts: Utf8PathBuf,
    /// Rendered chart, or `show` to draw it on the terminal.
    pub chart: Utf8PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_book: Utf8PathBuf::from("data/raw/book.txt"),
            clean_book: Utf8PathBuf::from("data/processed/book.txt"),
            word_counts: Utf8PathBuf::from("data/analyzed/word_counts.csv"),
            chart: Utf8PathBuf::from("results/histogram.txt"),
        }
    }
}

/// Effective book-freq settings.
///
/// `None` means "use the built-in default"; commands resolve those so that
/// command-line arguments can still win over configured values.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Stderr log level when neither `RUST_LOG` nor `-q`/`-v` is given.
    pub log_level: LogLevel,
    /// Directory for JSONL log files; file logging is off when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Minimum token length for `count` and `run` (default 1).
    pub min_length: Option<usize>,
    /// Bars drawn by `plot` and `run` (default 10).
    pub chart_limit: Option<usize>,
    /// Width in characters of the longest bar (default 50).
    pub chart_width: Option<usize>,
    /// Largest input file accepted, in bytes (default 32 MiB).
    pub max_input_bytes: Option<usize>,
    /// Accept inputs of any size, ignoring `max_input_bytes`.
    pub disable_input_limit: bool,
    /// File locations used by `run`.
    pub paths: PathsConfig,
}

impl Config {
    /// Effective input size limit, or `None` when the limit is disabled.
    pub fn input_limit(&self) -> Option<usize> {
        (!self.disable_input_limit).then(|| {
            self.max_input_bytes
                .unwrap_or(crate::dataset::DEFAULT_MAX_INPUT_BYTES)
        })
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Per-stage detail.
    Debug,
    /// Stage summaries (default).
    #[default]
    Info,
    /// Suspicious input, e.g. a book without Gutenberg markers.
    Warn,
    /// Failures only.
    Error,
}

impl LogLevel {
    /// Lowercase name, usable as an `EnvFilter` directive.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Which files contributed to a loaded [`Config`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Config from the platform config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Project files from the closest configured directory, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// Files given explicitly, in merge order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// The file that was merged last, and so wins any conflict.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .or(self.project_files.last())
            .or(self.user_file.as_ref())
            .map(Utf8PathBuf::as_path)
    }
}

/// On-disk config formats, in merge order within one directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Toml,
    Yaml,
    Yml,
    Json,
}

impl ConfigFormat {
    const ALL: [Self; 4] = [Self::Toml, Self::Yaml, Self::Yml, Self::Json];

    const fn extension(self) -> &'static str {
        match self {
            Self::Toml => "toml",
            Self::Yaml => "yaml",
            Self::Yml => "yml",
            Self::Json => "json",
        }
    }

    /// Unknown extensions are read as TOML.
    fn of(path: &Utf8Path) -> Self {
        match path.extension() {
            Some("yaml") => Self::Yaml,
            Some("yml") => Self::Yml,
            Some("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    fn merge_into(self, figment: Figment, path: &Utf8Path) -> Figment {
        let path = path.as_str();
        match self {
            Self::Toml => figment.merge(Toml::file_exact(path)),
            Self::Yaml | Self::Yml => figment.merge(Yaml::file_exact(path)),
            Self::Json => figment.merge(Json::file_exact(path)),
        }
    }
}

/// Builder that discovers and merges configuration sources.
#[derive(Debug)]
pub struct ConfigLoader {
    search_root: Option<Utf8PathBuf>,
    user_config: bool,
    stop_at_boundary: bool,
    explicit_files: Vec<Utf8PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Loader that reads the user config and stops project search at `.git`.
    pub const fn new() -> Self {
        Self {
            search_root: None,
            user_config: true,
            stop_at_boundary: true,
            explicit_files: Vec::new(),
        }
    }

    /// Look for project config in `dir` and its ancestors.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, dir: P) -> Self {
        self.search_root = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Include or skip the user config file.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.user_config = include;
        self
    }

    /// Keep searching past `.git` directories, up to the filesystem root.
    pub const fn search_past_repository(mut self) -> Self {
        self.stop_at_boundary = false;
        self
    }

    /// Merge `path` after all discovered files. Later calls win.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Merge every source and deserialize the result.
    #[tracing::instrument(skip(self), fields(search_root = ?self.search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        let sources = ConfigSources {
            user_file: if self.user_config {
                find_user_config()
            } else {
                None
            },
            project_files: self
                .search_root
                .as_deref()
                .map(|root| find_project_configs(root, self.stop_at_boundary))
                .unwrap_or_default(),
            explicit_files: self.explicit_files,
        };

        let files = sources
            .user_file
            .iter()
            .chain(&sources.project_files)
            .chain(&sources.explicit_files);
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        for file in files {
            tracing::debug!(file = %file, "merging config file");
            figment = ConfigFormat::of(file).merge_into(figment, file);
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__").lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::debug!(
            primary = ?sources.primary_file(),
            log_level = config.log_level.as_str(),
            "configuration loaded"
        );
        Ok((config, sources))
    }
}

/// Config files in the closest directory at or above `start` that has any.
///
/// A directory holding `.git` is still searched; its parents are not.
fn find_project_configs(start: &Utf8Path, stop_at_boundary: bool) -> Vec<Utf8PathBuf> {
    for dir in start.ancestors() {
        let found: Vec<Utf8PathBuf> = [format!(".{APP_NAME}"), APP_NAME.to_string()]
            .iter()
            .flat_map(|stem| {
                ConfigFormat::ALL
                    .into_iter()
                    .map(move |format| dir.join(format!("{stem}.{}", format.extension())))
            })
            .filter(|candidate| candidate.is_file())
            .collect();
        if !found.is_empty() {
            return found;
        }
        if stop_at_boundary && dir.join(PROJECT_BOUNDARY).exists() {
            break;
        }
    }
    Vec::new()
}

fn find_user_config() -> Option<Utf8PathBuf> {
    let dir = user_config_dir()?;
    ConfigFormat::ALL
        .into_iter()
        .map(|format| dir.join(format!("config.{}", format.extension())))
        .find(|candidate| candidate.is_file())
}

/// Platform config directory for book-freq, if a home directory exists.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let dirs = directories::ProjectDirs::from("", "", APP_NAME)?;
    Utf8PathBuf::from_path_buf(dirs.config_dir().to_path_buf()).ok()
}
