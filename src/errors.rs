/*!
 * Error types for the subshift crate.
 *
 * `SubtitleError` covers everything the parse/shift/render core can report.
 * The controller and binary wrap it in `anyhow` with file context.
 */

use thiserror::Error;

/// Errors that can occur during subtitle processing
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// A timestamp did not match `HH:MM:SS,mmm`
    #[error("Invalid SubRip timestamp: '{value}'")]
    Format {
        /// The offending text
        value: String,
    },

    /// A cue block could not be split into index, time range and text
    #[error("Malformed subtitle block {block}: {reason}")]
    Parse {
        /// 1-based position of the block in the file
        block: usize,
        /// What was wrong with it
        reason: String,
    },

    /// A backward shift would start a cue before its predecessor ends
    #[error(
        "Cannot overlap backward shift: subtitle {index} would start at {shifted_start_ms}ms, \
         before subtitle {previous_index} ends at {previous_end_ms}ms"
    )]
    Overlap {
        /// First cue of the shift
        index: u32,
        /// The unshifted preceding cue
        previous_index: u32,
        /// End of the preceding cue
        previous_end_ms: u64,
        /// Where the shifted cue would have started
        shifted_start_ms: i128,
    },

    /// A shift would move a cue before 00:00:00,000
    #[error("Shifting subtitle {index} by {delta_ms}ms would move {time_ms}ms below zero")]
    NegativeTime {
        /// Cue that would underflow
        index: u32,
        /// The start or end time that underflows
        time_ms: u64,
        /// Requested shift
        delta_ms: i64,
    },

    /// Render or shift attempted before anything was parsed
    #[error("File has not been parsed yet")]
    NotParsed,

    /// Reading the subtitle source failed
    #[error("Failed to read subtitle source: {0}")]
    Io(#[from] std::io::Error),
}

impl SubtitleError {
    pub(crate) fn parse(block: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            block,
            reason: reason.into(),
        }
    }
}
