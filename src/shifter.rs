/*!
 * Subtitle shifting session.
 *
 * A `SubtitleShifter` owns one file's subtitles from parse to render. It is
 * either unparsed or parsed; `shift` and `render` check this up front and
 * fail with `SubtitleError::NotParsed` rather than touching a collection
 * that does not exist yet.
 *
 * ```
 * use subshift::{LineEnding, SubtitleShifter};
 *
 * let mut subs = SubtitleShifter::new(LineEnding::Lf);
 * subs.parse_str("12\n00:00:01,000 --> 00:00:02,000\nHello\n")?;
 * subs.shift(12, 2_345)?;
 * assert_eq!(subs.render()?, "12\n00:00:03,345 --> 00:00:04,345\nHello");
 * # Ok::<(), subshift::SubtitleError>(())
 * ```
 */

use std::fs;
use std::path::Path;

use log::debug;

use crate::app_config::LineEnding;
use crate::errors::SubtitleError;
use crate::subtitle_processor::SubtitleCollection;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// Nothing parsed yet
    #[default]
    Unparsed,
    /// Subtitles parsed with the given line break
    Parsed {
        subtitles: SubtitleCollection,
        line_break: &'static str,
    },
}

/// One shift to apply to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRequest {
    /// First subtitle index to move
    pub index: u32,
    /// Signed amount in milliseconds; negative moves subtitles earlier
    pub delta_ms: i64,
}

impl ShiftRequest {
    pub fn new(index: u32, delta_ms: i64) -> Self {
        Self { index, delta_ms }
    }
}

/// Parse, shift and render one SubRip file
#[derive(Debug, Clone, Default)]
pub struct SubtitleShifter {
    line_ending: LineEnding,
    state: SessionState,
}

impl SubtitleShifter {
    /// Create an unparsed session using the given line ending
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            line_ending,
            state: SessionState::Unparsed,
        }
    }

    /// Parse subtitles from an in-memory string
    ///
    /// On error the session keeps whatever state it had before.
    pub fn parse_str(&mut self, content: &str) -> Result<(), SubtitleError> {
        let line_break = self.line_ending.resolve(content);
        let subtitles = SubtitleCollection::parse(content, line_break)?;
        self.state = SessionState::Parsed {
            subtitles,
            line_break,
        };
        Ok(())
    }

    /// Read a whole file and parse it
    pub fn parse_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), SubtitleError> {
        let path = path.as_ref();
        debug!("Reading subtitles from {:?}", path);
        let content = fs::read_to_string(path)?;
        self.parse_str(&content)
    }

    /// Shift subtitles from `index` onward by `delta_ms`
    ///
    /// Returns how many subtitles moved. See `SubtitleCollection::shift`.
    pub fn shift(&mut self, index: u32, delta_ms: i64) -> Result<usize, SubtitleError> {
        match &mut self.state {
            SessionState::Parsed { subtitles, .. } => subtitles.shift(index, delta_ms),
            SessionState::Unparsed => Err(SubtitleError::NotParsed),
        }
    }

    /// Apply several shifts in order, stopping at the first failure
    pub fn apply_all(&mut self, requests: &[ShiftRequest]) -> Result<usize, SubtitleError> {
        let mut total = 0;
        for request in requests {
            total += self.shift(request.index, request.delta_ms)?;
        }
        Ok(total)
    }

    /// Render the parsed subtitles as SRT text
    pub fn render(&self) -> Result<String, SubtitleError> {
        match &self.state {
            SessionState::Parsed {
                subtitles,
                line_break,
            } => Ok(subtitles.render(line_break)),
            SessionState::Unparsed => Err(SubtitleError::NotParsed),
        }
    }

    /// Whether subtitles have been parsed
    pub fn is_parsed(&self) -> bool {
        matches!(self.state, SessionState::Parsed { .. })
    }

    /// The parsed subtitles, if any
    pub fn subtitles(&self) -> Option<&SubtitleCollection> {
        match &self.state {
            SessionState::Parsed { subtitles, .. } => Some(subtitles),
            SessionState::Unparsed => None,
        }
    }

    /// The line break actually used for the parsed file
    pub fn line_break(&self) -> Option<&'static str> {
        match &self.state {
            SessionState::Parsed { line_break, .. } => Some(*line_break),
            SessionState::Unparsed => None,
        }
    }
}
