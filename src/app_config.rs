use anyhow::{anyhow, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use crate::file_utils::FileManager;
use crate::keywords::{KeywordSettings, DEFAULT_SIMILARITY_THRESHOLD, TAG_MIN_COUNT};
use crate::sheet::{CsvFileSource, CsvUrlSource, SheetSource, SheetsApiSource};

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Where the video sheet is read from
    #[serde(default)]
    pub source: SourceConfig,

    /// Site content root
    #[serde(default = "default_content_root")]
    pub content_root: PathBuf,

    /// Directory under the content root holding the generated articles
    #[serde(default = "default_articles_dir")]
    pub articles_dir: String,

    /// Extension of generated article files
    #[serde(default = "default_file_extension")]
    pub file_extension: String,

    /// Directory of already-downloaded images, if any
    #[serde(default)]
    pub images_dir: Option<PathBuf>,

    /// Maximum summary length in characters
    #[serde(default = "default_summary_length")]
    pub summary_length: usize,

    /// Minimum number of records for a keyword to become a tag
    #[serde(default = "default_tag_min_count")]
    pub tag_min_count: usize,

    /// Maximum edit distance reported as similar keywords
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: usize,

    /// Separator for list-valued metadata
    #[serde(default = "default_list_separator")]
    pub list_separator: String,

    /// Timeout for remote sources
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Show a progress bar while writing
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Sheet source selection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    // @source: Local CSV export
    CsvFile {
        path: PathBuf,
    },
    // @source: CSV export behind a URL
    CsvUrl {
        url: String,
    },
    // @source: Google Sheets values API
    Sheets {
        spreadsheet_id: String,
        #[serde(default = "default_sheet_range")]
        range: String,
        #[serde(default = "default_credentials_path")]
        credentials_path: PathBuf,
    },
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::CsvFile {
            path: default_csv_path(),
        }
    }
}

impl SourceConfig {
    // @returns: Lowercase source identifier
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CsvFile { .. } => "csv_file",
            Self::CsvUrl { .. } => "csv_url",
            Self::Sheets { .. } => "sheets",
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_csv_path() -> PathBuf {
    PathBuf::from("videos.csv")
}

fn default_sheet_range() -> String {
    "Sheet1".to_string()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("secrets/sheets.key.json")
}

fn default_content_root() -> PathBuf {
    PathBuf::from("content")
}

fn default_articles_dir() -> String {
    "videos".to_string()
}

fn default_file_extension() -> String {
    "rst".to_string()
}

fn default_summary_length() -> usize {
    crate::article::DEFAULT_SUMMARY_LENGTH
}

fn default_tag_min_count() -> usize {
    TAG_MIN_COUNT
}

fn default_similarity_threshold() -> usize {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_list_separator() -> String {
    crate::content_writer::DEFAULT_LIST_SEPARATOR.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load a config file, writing a default one first if it does not exist
    pub fn load_or_create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if FileManager::file_exists(path) {
            let content = FileManager::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            return Ok(config);
        }

        warn!("Config file not found at {:?}, creating default config.", path);
        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;
        FileManager::write_to_file(path, &config_json)
            .with_context(|| format!("Failed to write default config to file: {:?}", path))?;

        Ok(config)
    }

    /// Load a config file, falling back to defaults without writing anything
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !FileManager::file_exists(path) {
            warn!("Config file not found at {:?}, using defaults.", path);
            return Ok(Config::default());
        }

        let content = FileManager::read_to_string(path)?;
        serde_json::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.articles_dir.trim().is_empty() {
            return Err(anyhow!("articles_dir must not be empty"));
        }

        // The articles directory is wiped on every build, keep it inside the content root
        let escapes_root = Path::new(&self.articles_dir)
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if escapes_root {
            return Err(anyhow!(
                "articles_dir must be a plain relative path under content_root, got {:?}",
                self.articles_dir
            ));
        }

        if self.file_extension.trim_start_matches('.').trim().is_empty() {
            return Err(anyhow!("file_extension must not be empty"));
        }

        if self.list_separator.is_empty() {
            return Err(anyhow!("list_separator must not be empty"));
        }

        if self.tag_min_count == 0 {
            return Err(anyhow!("tag_min_count must be at least 1"));
        }

        // Room for at least one character and the "..." placeholder
        if self.summary_length < 4 {
            return Err(anyhow!("summary_length must be at least 4, got {}", self.summary_length));
        }

        match &self.source {
            SourceConfig::Sheets { spreadsheet_id, .. } if spreadsheet_id.trim().is_empty() => {
                return Err(anyhow!("spreadsheet_id is required for the sheets source"));
            }
            SourceConfig::CsvUrl { url } => {
                url::Url::parse(url).with_context(|| format!("Invalid csv_url source: {}", url))?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Directory receiving the generated articles
    pub fn articles_path(&self) -> PathBuf {
        self.content_root.join(&self.articles_dir)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn keyword_settings(&self) -> KeywordSettings {
        KeywordSettings {
            tag_min_count: self.tag_min_count,
            similarity_threshold: self.similarity_threshold,
        }
    }

    /// Instantiate the configured sheet source
    pub fn build_source(&self) -> Box<dyn SheetSource> {
        match &self.source {
            SourceConfig::CsvFile { path } => Box::new(CsvFileSource::new(path)),
            SourceConfig::CsvUrl { url } => Box::new(CsvUrlSource::new(url, self.request_timeout())),
            SourceConfig::Sheets {
                spreadsheet_id,
                range,
                credentials_path,
            } => Box::new(SheetsApiSource::new(
                spreadsheet_id,
                range,
                credentials_path,
                self.request_timeout(),
            )),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            content_root: default_content_root(),
            articles_dir: default_articles_dir(),
            file_extension: default_file_extension(),
            images_dir: None,
            summary_length: default_summary_length(),
            tag_min_count: default_tag_min_count(),
            similarity_threshold: default_similarity_threshold(),
            list_separator: default_list_separator(),
            request_timeout_secs: default_timeout_secs(),
            show_progress: default_true(),
            log_level: LogLevel::default(),
        }
    }
}
