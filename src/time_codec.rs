/*!
 * Conversion between SubRip timestamps and millisecond counts.
 *
 * A SubRip timestamp looks like `01:23:45,678`. Decoding accepts fields of
 * any width (`1:2:3,4` is 1h 2m 3s 4ms); encoding always zero-pads.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::SubtitleError;

// @const: SRT timestamp regex, variable-width fields
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+):(\d+):(\d+),(\d+)$").unwrap()
});

const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_SECOND: u64 = 1_000;

/// Separator between the start and end timestamps of a cue
pub const TIME_SEPARATOR: &str = " --> ";

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds
///
/// Leading and trailing whitespace is ignored. Anything else that does not
/// match the pattern, or that overflows a `u64`, is a `Format` error.
pub fn decode(timestamp: &str) -> Result<u64, SubtitleError> {
    let format_error = || SubtitleError::Format {
        value: timestamp.to_string(),
    };

    let caps = TIMESTAMP_REGEX
        .captures(timestamp.trim())
        .ok_or_else(format_error)?;

    let field = |i: usize| -> Result<u64, SubtitleError> {
        caps[i].parse::<u64>().map_err(|_| format_error())
    };

    let hours = field(1)?;
    let minutes = field(2)?;
    let seconds = field(3)?;
    let millis = field(4)?;

    hours
        .checked_mul(MS_PER_HOUR)
        .and_then(|total| total.checked_add(minutes.checked_mul(MS_PER_MINUTE)?))
        .and_then(|total| total.checked_add(seconds.checked_mul(MS_PER_SECOND)?))
        .and_then(|total| total.checked_add(millis))
        .ok_or_else(format_error)
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
///
/// Hours wrap at 60, so only values below 60 hours survive a round trip.
pub fn encode(ms: u64) -> String {
    let hours = (ms / MS_PER_HOUR) % 60;
    let minutes = (ms / MS_PER_MINUTE) % 60;
    let seconds = (ms / MS_PER_SECOND) % 60;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Format a cue's time range line (`start --> end`)
pub fn encode_range(start_ms: u64, end_ms: u64) -> String {
    format!("{}{}{}", encode(start_ms), TIME_SEPARATOR, encode(end_ms))
}
