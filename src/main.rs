// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use vidcatalog::app_config::{self, Config, SourceConfig};
use vidcatalog::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate the sheet and write the site content (default command)
    Build(RunArgs),

    /// Validate the sheet and report keywords without writing anything
    Check(RunArgs),

    /// Generate shell completions for vidcatalog
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: PathBuf,

    /// Read the sheet from a local CSV export
    #[arg(long, value_name = "PATH", conflicts_with_all = ["csv_url", "sheet_id"])]
    csv: Option<PathBuf>,

    /// Read the sheet from a CSV export URL
    #[arg(long, value_name = "URL", conflicts_with = "sheet_id")]
    csv_url: Option<String>,

    /// Read the sheet through the Google Sheets API
    #[arg(long, value_name = "SPREADSHEET_ID")]
    sheet_id: Option<String>,

    /// Credential file for the Google Sheets API
    #[arg(long, value_name = "PATH", requires = "sheet_id")]
    credentials: Option<PathBuf>,

    /// Site content root
    #[arg(long, value_name = "DIR")]
    content_root: Option<PathBuf>,

    /// Directory of already-downloaded images
    #[arg(long, value_name = "DIR")]
    images_dir: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,
}

/// vidcatalog - video sheet to static-site content
///
/// Validates a spreadsheet of video metadata, derives tags from its list
/// columns and writes one content page per video for the site generator.
#[derive(Parser, Debug)]
#[command(name = "vidcatalog")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(about = "Turn a video metadata sheet into static-site content")]
#[command(long_about = "vidcatalog reads a video metadata sheet, validates it and writes one reStructuredText page per video.

EXAMPLES:
    vidcatalog                                   # Build using conf.json
    vidcatalog --csv videos.csv                  # Build from a local CSV export
    vidcatalog check --csv videos.csv            # Validate and print the keyword report only
    vidcatalog --sheet-id 1AbC --credentials key.json
    vidcatalog completions bash > vidcatalog.bash

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, build creates
    a default one automatically while check only uses the defaults.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Marker and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌", "1;31"),
            Level::Warn => ("🚧", "1;33"),
            Level::Info => ("  ", "1;32"),
            Level::Debug => ("🔍", "1;36"),
            Level::Trace => ("📋", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Runtime filtering goes through log::set_max_level
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (marker, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, marker, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Start at trace so later level changes only need set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    let outcome = match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "vidcatalog", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Build(args)) => run_build(&args),
        Some(Commands::Check(args)) => run_check(&args),
        None => run_build(&cli.run),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Load the config file and apply command line overrides
///
/// `check` passes `create_missing = false` so it never writes a config file.
fn load_config(options: &RunArgs, create_missing: bool) -> Result<Config> {
    // Apply a command line log level before anything else is logged
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = if create_missing {
        Config::load_or_create(&options.config_path)?
    } else {
        Config::load_or_default(&options.config_path)?
    };

    if let Some(path) = &options.csv {
        config.source = SourceConfig::CsvFile { path: path.clone() };
    } else if let Some(url) = &options.csv_url {
        config.source = SourceConfig::CsvUrl { url: url.clone() };
    } else if let Some(spreadsheet_id) = &options.sheet_id {
        let (range, credentials_path) = match &config.source {
            SourceConfig::Sheets { range, credentials_path, .. } => (range.clone(), credentials_path.clone()),
            _ => ("Sheet1".to_string(), PathBuf::from("secrets/sheets.key.json")),
        };
        config.source = SourceConfig::Sheets {
            spreadsheet_id: spreadsheet_id.clone(),
            range,
            credentials_path: options.credentials.clone().unwrap_or(credentials_path),
        };
    }

    if let Some(content_root) = &options.content_root {
        config.content_root = content_root.clone();
    }

    if let Some(images_dir) = &options.images_dir {
        config.images_dir = Some(images_dir.clone());
    }

    if options.no_progress {
        config.show_progress = false;
    }

    match &options.log_level {
        Some(log_level) => config.log_level = log_level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_build(options: &RunArgs) -> Result<()> {
    let config = load_config(options, true)?;
    let controller = Controller::with_config(config)?;

    let summary = controller.run()?;

    info!(
        "Done: {} articles written, {} rows not exported ({})",
        summary.written.len(),
        summary.skipped,
        Controller::format_duration(summary.elapsed)
    );

    Ok(())
}

fn run_check(options: &RunArgs) -> Result<()> {
    let config = load_config(options, false)?;
    let controller = Controller::with_config(config)?;

    let site = controller.check()?;

    info!(
        "Sheet is valid: {} articles, {} rows not exported",
        site.articles.len(),
        site.skipped
    );
    for table in site.keywords.iter() {
        let tags: Vec<&str> = table
            .entries()
            .iter()
            .filter(|entry| entry.is_tag)
            .map(|entry| entry.name.as_str())
            .collect();
        info!("  {} ({} tags): {}", table.column(), tags.len(), tags.join(", "));
    }

    if site.articles.is_empty() {
        warn!("No rows are marked for export");
    }

    Ok(())
}
