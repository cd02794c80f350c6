use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Line break convention of the subtitle files
    #[serde(default)]
    pub line_ending: LineEnding,

    /// Direction used when the command line does not give one
    #[serde(default)]
    pub default_operation: ShiftOperation,

    /// Largest accepted shift magnitude in milliseconds
    #[serde(default = "default_max_shift_ms")]
    pub max_shift_ms: u64,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Line break convention used to split and join subtitle text
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    // @ending: Windows style, what most .srt files use
    #[default]
    Crlf,
    // @ending: Unix style
    Lf,
    // @ending: Detected from the file content
    Auto,
}

impl LineEnding {
    /// The line break to use for `content`
    ///
    /// `Auto` picks CRLF if the content contains any, LF otherwise.
    pub fn resolve(&self, content: &str) -> &'static str {
        match self {
            Self::Crlf => "\r\n",
            Self::Lf => "\n",
            Self::Auto if content.contains("\r\n") => "\r\n",
            Self::Auto => "\n",
        }
    }
}

impl std::fmt::Display for LineEnding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Crlf => "crlf",
            Self::Lf => "lf",
            Self::Auto => "auto",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for LineEnding {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "crlf" => Ok(Self::Crlf),
            "lf" => Ok(Self::Lf),
            "auto" => Ok(Self::Auto),
            _ => Err(anyhow!("Invalid line ending: {}", s)),
        }
    }
}

/// Direction of a shift
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftOperation {
    /// Move subtitles later
    #[default]
    Add,
    /// Move subtitles earlier
    Sub,
}

impl ShiftOperation {
    /// Signed shift for an unsigned amount
    pub fn apply(&self, amount_ms: u64) -> i64 {
        let amount = i64::try_from(amount_ms).unwrap_or(i64::MAX);
        match self {
            Self::Add => amount,
            Self::Sub => -amount,
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

fn default_max_shift_ms() -> u64 {
    24 * 60 * 60 * 1000 // one day
}

impl Config {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Write configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;

        std::fs::write(path, config_json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_shift_ms == 0 {
            return Err(anyhow!("max_shift_ms must be greater than zero"));
        }

        if i64::try_from(self.max_shift_ms).is_err() {
            return Err(anyhow!("max_shift_ms is too large: {}", self.max_shift_ms));
        }

        Ok(())
    }

    /// Check a signed shift against `max_shift_ms`
    pub fn check_shift(&self, delta_ms: i64) -> Result<()> {
        if delta_ms.unsigned_abs() > self.max_shift_ms {
            return Err(anyhow!(
                "Shift of {}ms exceeds the configured maximum of {}ms",
                delta_ms, self.max_shift_ms
            ));
        }
        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            line_ending: LineEnding::default(),
            default_operation: ShiftOperation::default(),
            max_shift_ms: default_max_shift_ms(),
            log_level: LogLevel::default(),
        }
    }
}
