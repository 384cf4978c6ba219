use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::article::{Article, ArticleBuilder};
use crate::content_writer::ContentWriter;
use crate::errors::PipelineError;
use crate::keywords::{extract_keywords, KeywordTables};
use crate::media::ImageIndex;
use crate::models::ValidatedRecord;
use crate::sheet::SheetSource;
use crate::validation::ValidationService;

// @module: Application controller sequencing the content pipeline

/// Everything derived from the sheet before anything is written
#[derive(Debug, Clone)]
pub struct SiteData {
    pub records: Vec<ValidatedRecord>,
    pub keywords: KeywordTables,
    pub articles: Vec<Article>,
    /// Rows dropped because they were not marked for export
    pub skipped: usize,
}

/// Outcome of a full build
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub written: Vec<PathBuf>,
    pub skipped: usize,
    pub elapsed: Duration,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, PipelineError> {
        config
            .validate()
            .map_err(|e| PipelineError::Config(format!("{:#}", e)))?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read, validate and derive keywords and articles from the configured source
    pub fn check(&self) -> Result<SiteData, PipelineError> {
        let source = self.config.build_source();
        self.build_site_data(source.as_ref())
    }

    /// Read, validate and derive keywords and articles from `source`
    pub fn build_site_data(&self, source: &dyn SheetSource) -> Result<SiteData, PipelineError> {
        info!("Reading {}", source.describe());
        let table = source.fetch()?;
        debug!("Fetched {} rows", table.len());

        let raw = table.into_records()?;
        let cleaned = ValidationService::new().clean(raw)?;

        let keywords = extract_keywords(&cleaned.records, &self.config.keyword_settings());
        let articles = ArticleBuilder::new(&keywords, self.config.summary_length).build_all(&cleaned.records);

        Ok(SiteData {
            records: cleaned.records,
            keywords,
            articles,
            skipped: cleaned.skipped,
        })
    }

    /// Run the whole pipeline against the configured source
    pub fn run(&self) -> Result<RunSummary, PipelineError> {
        let source = self.config.build_source();
        self.run_with_source(source.as_ref())
    }

    /// Run the whole pipeline against `source`
    pub fn run_with_source(&self, source: &dyn SheetSource) -> Result<RunSummary, PipelineError> {
        let start_time = Instant::now();

        let site = self.build_site_data(source)?;
        let images = self.load_images()?;

        let writer = ContentWriter::new(
            self.config.articles_path(),
            &self.config.file_extension,
            &self.config.list_separator,
        );

        let progress_bar = self.progress_bar(site.articles.len() as u64);
        let written = writer.write_all(&site.articles, &images, &progress_bar)?;

        let elapsed = start_time.elapsed();
        info!(
            "Wrote {} articles to {:?} in {}",
            written.len(),
            writer.articles_dir(),
            Self::format_duration(elapsed)
        );
        for table in site.keywords.iter() {
            info!("  {}: {} tags out of {} values", table.column(), table.tag_count(), table.len());
        }

        Ok(RunSummary {
            written,
            skipped: site.skipped,
            elapsed,
        })
    }

    fn load_images(&self) -> Result<ImageIndex, PipelineError> {
        match &self.config.images_dir {
            Some(images_dir) => Ok(ImageIndex::scan(images_dir, &self.config.content_root)?),
            None => Ok(ImageIndex::default()),
        }
    }

    fn progress_bar(&self, len: u64) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let progress_bar = ProgressBar::new(len);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} articles ({percent}%) {msg}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar
    }

    /// Human-readable elapsed time
    pub fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
