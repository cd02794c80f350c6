// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow};
use log::{error, warn, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use subshift::app_config::{self, Config, LineEnding, ShiftOperation};
use subshift::app_controller::{self, Controller, OutputTarget, ShiftJob};

/// CLI Wrapper for ShiftOperation to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliOperation {
    /// Move subtitles later
    Add,
    /// Move subtitles earlier
    Sub,
}

impl From<CliOperation> for ShiftOperation {
    fn from(cli_operation: CliOperation) -> Self {
        match cli_operation {
            CliOperation::Add => ShiftOperation::Add,
            CliOperation::Sub => ShiftOperation::Sub,
        }
    }
}

/// CLI Wrapper for LineEnding to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLineEnding {
    Crlf,
    Lf,
    Auto,
}

impl From<CliLineEnding> for LineEnding {
    fn from(cli_ending: CliLineEnding) -> Self {
        match cli_ending {
            CliLineEnding::Crlf => LineEnding::Crlf,
            CliLineEnding::Lf => LineEnding::Lf,
            CliLineEnding::Auto => LineEnding::Auto,
        }
    }
}

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
    /// Shift subtitles from an index onward (default command)
    Shift(ShiftArgs),

    /// Generate shell completions for subshift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ShiftArgs {
    /// Source subtitle file
    #[arg(value_name = "SOURCE")]
    source: PathBuf,

    /// Destination file, or - for stdout (default: SOURCE stem + .shifted.srt)
    #[arg(value_name = "DEST")]
    dest: Option<PathBuf>,

    /// Shift direction
    #[arg(short, long, value_enum)]
    operation: Option<CliOperation>,

    /// Index of the first subtitle to shift
    #[arg(short, long)]
    index: u32,

    /// Shift amount in seconds (e.g. 2,345 or 0.5)
    #[arg(short, long)]
    time: String,

    /// Line break convention of the subtitle file
    #[arg(short, long, value_enum)]
    line_ending: Option<CliLineEnding>,

    /// Force overwrite of an existing destination
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subshift - move SubRip subtitles in time
#[derive(Parser, Debug)]
#[command(name = "subshift")]
#[command(version)]
#[command(about = "Shift SubRip (.srt) subtitles from an index onward")]
#[command(long_about = "subshift moves every subtitle from a given index onward by a fixed amount.

EXAMPLES:
    subshift --index 12 --time 2,345 source.srt dest.srt           # 2.345s later
    subshift -o sub -i 12 -t 2,345 source.srt dest.srt             # 2.345s earlier
    subshift -i 1 -t 0.5 -l lf source.srt -                        # print to stdout
    subshift -i 3 -t 1 source.srt                                  # writes source.shifted.srt
    subshift completions bash > subshift.bash                      # shell completions

A backward shift that would start a subtitle before the previous one ends is
refused and nothing is written.

CONFIGURATION:
    Configuration is stored in conf.json by default. If the config file doesn't
    exist, a default one will be created automatically.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Source subtitle file
    #[arg(value_name = "SOURCE")]
    source: Option<PathBuf>,

    /// Destination file, or - for stdout (default: SOURCE stem + .shifted.srt)
    #[arg(value_name = "DEST")]
    dest: Option<PathBuf>,

    /// Shift direction
    #[arg(short, long, value_enum)]
    operation: Option<CliOperation>,

    /// Index of the first subtitle to shift
    #[arg(short, long)]
    index: Option<u32>,

    /// Shift amount in seconds (e.g. 2,345 or 0.5)
    #[arg(short, long)]
    time: Option<String>,

    /// Line break convention of the subtitle file
    #[arg(short, long, value_enum)]
    line_ending: Option<CliLineEnding>,

    /// Force overwrite of an existing destination
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
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
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:<5} {}\x1B[0m",
                color, now, record.level(), record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    if let Err(e) = CustomLogger::init(LevelFilter::Info) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subshift", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Shift(args)) => run_shift(args),
        None => {
            // Default behavior - use top-level args
            let source = cli.source.ok_or_else(|| anyhow!("SOURCE is required"))?;
            let index = cli.index.ok_or_else(|| anyhow!("--index is required"))?;
            let time = cli.time.ok_or_else(|| anyhow!("--time is required"))?;

            let shift_args = ShiftArgs {
                source,
                dest: cli.dest,
                operation: cli.operation,
                index,
                time,
                line_ending: cli.line_ending,
                force_overwrite: cli.force_overwrite,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_shift(shift_args)
        }
    }
}

fn run_shift(options: ShiftArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(config_log_level.to_level_filter());
    }

    let mut config = load_or_create_config(Path::new(&options.config_path))?;

    // Override config with CLI options if provided
    if let Some(line_ending) = &options.line_ending {
        config.line_ending = line_ending.clone().into();
    }

    if let Some(operation) = &options.operation {
        config.default_operation = operation.clone().into();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(config.log_level.to_level_filter());

    let amount_ms = app_controller::parse_time_arg(&options.time)?;
    let delta_ms = config.default_operation.apply(amount_ms);
    debug!("Shift of {}ms ({:?} {}ms)", delta_ms, config.default_operation, amount_ms);

    let controller = Controller::with_config(config)?;
    let output = OutputTarget::resolve(&options.source, options.dest);
    let job = ShiftJob {
        input_file: options.source,
        output,
        index: options.index,
        delta_ms,
    };

    controller.run(&job, options.force_overwrite)?;

    Ok(())
}

fn load_or_create_config(config_path: &Path) -> Result<Config> {
    if config_path.exists() {
        return Config::from_file(config_path);
    }

    // Create default configuration if not exists
    warn!("Config file not found at {:?}, creating default config.", config_path);
    let config = Config::default();
    config.save(config_path)?;
    Ok(config)
}
