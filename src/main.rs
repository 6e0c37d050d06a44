// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use autoedit::app_config::{self, Config};
use autoedit::app_controller::Controller;

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
    /// Build a timeline from a pipeline request
    Plan(PlanArgs),

    /// Estimate speech length and segmentation of a script
    Estimate(EstimateArgs),

    /// Generate shell completions for autoedit
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Pipeline request (JSON)
    #[arg(value_name = "REQUEST_JSON")]
    request_path: PathBuf,

    /// Where to write the pipeline output (default: <request>.timeline.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for transition and sound effect choices
    #[arg(long, default_value_t = 0, env = "AUTOEDIT_SEED")]
    seed: u64,

    /// Directory scanned for helper videos, images and sound effects
    #[arg(short, long)]
    assets_dir: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(short, long)]
    quiet: bool,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct EstimateArgs {
    /// Script text file
    #[arg(value_name = "SCRIPT_TXT")]
    script_path: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(clap::Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "autoedit.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// autoedit - script-to-timeline editing for talking-head videos
///
/// Turns a video script, an avatar recording and helper media into a
/// frame-accurate edit timeline for a renderer.
#[derive(Parser, Debug)]
#[command(name = "autoedit")]
#[command(version)]
#[command(about = "Script-to-timeline video edit planner")]
#[command(long_about = "autoedit segments a video script, trims silences from the avatar recording,
matches helper media to segments and plans layouts, transitions and overlays
into a frame-accurate timeline.

EXAMPLES:
    autoedit plan request.json                          # Plan using default config
    autoedit plan request.json -o out/timeline.json     # Choose the output file
    autoedit plan request.json --seed 42 -a media/      # Seeded run with scanned media
    autoedit estimate script.txt                        # Estimate speech length
    autoedit completions bash > autoedit.bash           # Generate bash completions

CONFIGURATION:
    Configuration is stored in autoedit.json by default. You can specify a
    different config file with --config-path. If the config file doesn't exist,
    a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,
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

    // @returns: Marker for log level
    fn get_marker_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "✖",
            Level::Warn => "!",
            Level::Info => " ",
            Level::Debug => "·",
            Level::Trace => "»",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_marker_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set through
    // log::set_max_level once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "autoedit", &mut std::io::stdout());
            Ok(())
        }
        Commands::Plan(args) => run_plan(args),
        Commands::Estimate(args) => run_estimate(args),
    }
}

/// Load the config (creating a default one when missing), apply the CLI
/// overrides and the log level, and validate it
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(cmd_log_level) = &common.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config_path = Path::new(&common.config_path);
    let mut config = if config_path.exists() {
        Config::from_file(config_path)?
    } else {
        warn!("Config file not found at '{}', creating default config.", common.config_path);
        let config = Config::default();
        config
            .save(config_path)
            .context(format!("Failed to write default config to file: {}", common.config_path))?;
        config
    };

    if let Some(log_level) = &common.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level(config.log_level.to_level_filter());
    }

    config.validate().context("Configuration validation failed")?;
    Ok(config)
}

fn run_plan(args: PlanArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let controller = Controller::with_config(config)?;

    let report = controller.plan(
        &args.request_path,
        args.output.as_deref(),
        args.seed,
        args.assets_dir.as_deref(),
        !args.quiet,
    )?;

    let layouts = report
        .stats
        .layout_counts
        .iter()
        .map(|(layout, count)| format!("{}={}", layout, count))
        .collect::<Vec<_>>()
        .join(" ");

    info!(
        "{} items, {} frames ({:.2}s), layouts: {}, transitions: {}, caption words: {}",
        report.stats.item_count,
        report.stats.total_duration_frames,
        report.stats.total_duration_seconds,
        layouts,
        report.stats.transition_count,
        report.stats.caption_word_count
    );
    if report.warning_count > 0 {
        warn!("{} warnings, see {:?}", report.warning_count, report.output_path);
    }
    info!("Fingerprint: {}", report.fingerprint);

    Ok(())
}

fn run_estimate(args: EstimateArgs) -> Result<()> {
    let config = load_config(&args.common)?;
    let controller = Controller::with_config(config)?;

    let estimate = controller.estimate(&args.script_path)?;
    info!(
        "{} words in {} segments, about {:.1}s ({} frames)",
        estimate.word_count, estimate.segment_count, estimate.estimated_seconds, estimate.estimated_frames
    );

    Ok(())
}
