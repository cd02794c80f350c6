use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::shifter::SubtitleShifter;

// @module: Application controller for subtitle shifting

// @const: Shift amount in seconds, "," or "." before up to three fraction digits
static TIME_ARG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+)(?:[.,](\d{1,3}))?$").unwrap()
});

/// Convert a user-facing seconds value (`2,345`, `0.5`, `10`) to milliseconds
pub fn parse_time_arg(value: &str) -> Result<u64> {
    let caps = TIME_ARG_REGEX
        .captures(value.trim())
        .ok_or_else(|| anyhow!("Invalid time '{}', expected seconds like 2,345 or 0.5", value))?;

    let seconds: u64 = caps[1]
        .parse()
        .with_context(|| format!("Invalid seconds in time '{}'", value))?;

    // "5" means 500ms, "05" means 50ms
    let millis = match caps.get(2) {
        Some(fraction) => {
            let digits = fraction.as_str();
            let fraction_ms: u64 = digits.parse()?;
            fraction_ms * 10u64.pow(3 - digits.len() as u32)
        }
        None => 0,
    };

    seconds
        .checked_mul(1_000)
        .and_then(|ms| ms.checked_add(millis))
        .ok_or_else(|| anyhow!("Time '{}' is too large", value))
}

/// Where rendered subtitles go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    File(PathBuf),
    Stdout,
}

// @const: Suffix of the destination file when none is given
pub const DEFAULT_OUTPUT_SUFFIX: &str = "shifted";

impl OutputTarget {
    /// `dest` if given, otherwise `<stem>.shifted.srt` next to the input
    pub fn resolve<P: AsRef<Path>>(input_file: P, dest: Option<PathBuf>) -> Self {
        match dest {
            Some(path) => path.into(),
            None => OutputTarget::File(FileManager::generate_output_path(
                input_file,
                DEFAULT_OUTPUT_SUFFIX,
            )),
        }
    }
}

impl From<PathBuf> for OutputTarget {
    fn from(path: PathBuf) -> Self {
        if path.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path)
        }
    }
}

/// One shift to run from a source file to a destination
#[derive(Debug, Clone)]
pub struct ShiftJob {
    pub input_file: PathBuf,
    pub output: OutputTarget,
    pub index: u32,
    pub delta_ms: i64,
}

/// Outcome of a finished job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftReport {
    /// Subtitles in the source file
    pub total_entries: usize,
    /// Subtitles that moved
    pub shifted_entries: usize,
}

/// Main application controller for subtitle shifting
pub struct Controller {
    // @field: App configuration
    pub config: Config,
}

impl Controller {
    /// Create a new controller with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Read, shift and write one subtitle file
    pub fn run(&self, job: &ShiftJob, force_overwrite: bool) -> Result<ShiftReport> {
        if !FileManager::file_exists(&job.input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", job.input_file));
        }

        if !FileManager::is_subtitle_file(&job.input_file) {
            warn!("{:?} does not have an .srt extension, parsing it as SubRip anyway", job.input_file);
        }

        if let OutputTarget::File(path) = &job.output {
            if path.exists() && !force_overwrite {
                return Err(anyhow!(
                    "Output file already exists: {:?}. Use -f to force overwrite.",
                    path
                ));
            }
        }

        self.config.check_shift(job.delta_ms)?;

        let content = FileManager::read_to_string(&job.input_file)?;
        let mut shifter = SubtitleShifter::new(self.config.line_ending);
        shifter
            .parse_str(&content)
            .with_context(|| format!("Failed to parse subtitles in {:?}", job.input_file))?;

        let total_entries = shifter.subtitles().map_or(0, |subs| subs.len());
        debug!(
            "Parsed {} subtitles from {:?} using {:?} line breaks",
            total_entries,
            job.input_file,
            shifter.line_break().unwrap_or_default()
        );

        let shifted_entries = shifter
            .shift(job.index, job.delta_ms)
            .with_context(|| format!("Failed to shift subtitles from index {}", job.index))?;

        if shifted_entries == 0 {
            warn!("No subtitle with index {} in {:?}, nothing was shifted", job.index, job.input_file);
        }

        let rendered = shifter.render()?;
        match &job.output {
            OutputTarget::File(path) => {
                FileManager::write_to_file(path, &rendered)?;
                info!(
                    "Shifted {} of {} subtitles by {}ms: {:?}",
                    shifted_entries, total_entries, job.delta_ms, path
                );
            }
            OutputTarget::Stdout => FileManager::write_to_stdout(&rendered)?,
        }

        Ok(ShiftReport {
            total_entries,
            shifted_entries,
        })
    }
}
