// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{ChapterJob, Controller};
use crate::metadata::GlobalMetadata;

mod app_config;
mod app_controller;
mod chapters;
mod errors;
mod file_utils;
mod language_utils;
mod media;
mod metadata;
mod timecode;

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

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add chapters and metadata to a video file (default command)
    #[command(alias = "chapters")]
    Add(AddArgs),

    /// Generate shell completions for shears
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct AddArgs {
    /// The video file to add chapters to
    #[arg(value_name = "VIDEO_FILE")]
    video: PathBuf,

    /// Text file containing the timecodes and titles of the chapters
    #[arg(value_name = "CHAPTERS_FILE")]
    chapters: PathBuf,

    /// Title of the movie
    #[arg(short = 't', long)]
    movie_title: Option<String>,

    /// Author of the movie
    #[arg(short, long)]
    author: Option<String>,

    /// Year of the movie
    #[arg(short, long)]
    year: Option<String>,

    /// Output file path (default: next to the input with a suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Subtitle file to mux into the output
    #[arg(long)]
    subtitle: Option<PathBuf>,

    /// ISO 639 language code for the subtitle track (e.g. 'en', 'fre')
    #[arg(long, requires = "subtitle")]
    subtitle_language: Option<String>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// Shears - add chapter markers to video files
///
/// Parses a chapter list, generates an FFMETADATA1 document and merges it
/// into the video container with ffmpeg, without re-encoding.
#[derive(Parser, Debug)]
#[command(name = "shears")]
#[command(version = "1.0.0")]
#[command(about = "Add chapter markers and metadata to video files")]
#[command(long_about = "Shears adds chapter markers, global metadata and subtitle tracks to a
video file. Chapters come from a plain text file with one chapter per line,
a timecode (HH:MM:SS or MM:SS) anywhere on the line and the rest as title.

EXAMPLES:
    shears movie.mkv chapters.txt                 # Default output: movie_Shear.mkv
    shears -t \"My Movie\" -a \"Me\" -y 2023 movie.mkv chapters.txt
    shears -o final movie.mkv chapters.txt        # Write to final.mkv
    shears -f movie.mkv chapters.txt              # Overwrite existing output
    shears --subtitle subs.srt --subtitle-language en movie.mp4 chapters.txt
    shears completions bash > shears.bash         # Generate bash completions

CHAPTER FILE FORMAT:
    0:00 Intro
    1:30 First verse
    1:02:03 Finale
Lines without a timecode are ignored.

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a
    different file with --config-path. If the config file doesn't exist, a
    default one is created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// The video file to add chapters to
    #[arg(value_name = "VIDEO_FILE")]
    video: Option<PathBuf>,

    /// Text file containing the timecodes and titles of the chapters
    #[arg(value_name = "CHAPTERS_FILE")]
    chapters: Option<PathBuf>,

    /// Title of the movie
    #[arg(short = 't', long)]
    movie_title: Option<String>,

    /// Author of the movie
    #[arg(short, long)]
    author: Option<String>,

    /// Year of the movie
    #[arg(short, long)]
    year: Option<String>,

    /// Output file path (default: next to the input with a suffix)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Subtitle file to mux into the output
    #[arg(long)]
    subtitle: Option<PathBuf>,

    /// ISO 639 language code for the subtitle track (e.g. 'en', 'fre')
    #[arg(long, requires = "subtitle")]
    subtitle_language: Option<String>,

    /// Force overwrite of an existing output file
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
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

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {}\x1B[0m", color, now, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "shears", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Add(args)) => run_add(args).await,
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let video = cli
                .video
                .ok_or_else(|| anyhow!("VIDEO_FILE is required when no subcommand is specified"))?;
            let chapters = cli
                .chapters
                .ok_or_else(|| anyhow!("CHAPTERS_FILE is required when no subcommand is specified"))?;

            let args = AddArgs {
                video,
                chapters,
                movie_title: cli.movie_title,
                author: cli.author,
                year: cli.year,
                output: cli.output,
                subtitle: cli.subtitle,
                subtitle_language: cli.subtitle_language,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_add(args).await
        }
    }
}

async fn run_add(options: AddArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    let job = ChapterJob {
        video_path: options.video,
        chapters_path: options.chapters,
        output_path: options.output,
        metadata: GlobalMetadata {
            title: options.movie_title.unwrap_or_default(),
            artist: options.author.unwrap_or_default(),
            date: options.year.unwrap_or_default(),
        },
        subtitle_path: options.subtitle,
        subtitle_language: options.subtitle_language,
        force_overwrite: options.force_overwrite,
    };

    controller.run(job).await?;

    Ok(())
}
