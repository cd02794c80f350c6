use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

use log::{debug, warn};

use crate::errors::SubtitleError;
use crate::time_codec::{self, TIME_SEPARATOR};

// @module: Subtitle parsing, shifting and rendering

// @const: UTF-8 byte order mark
const BOM: char = '\u{feff}';

// @returns: Block without leading or trailing whole line breaks
fn trim_line_breaks<'a>(mut block: &'a str, line_break: &str) -> &'a str {
    if line_break.is_empty() {
        return block;
    }
    while let Some(rest) = block.strip_prefix(line_break) {
        block = rest;
    }
    while let Some(rest) = block.strip_suffix(line_break) {
        block = rest;
    }
    block
}

// @struct: Single subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Sequence number
    pub seq_num: u32,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms
    pub end_time_ms: u64,

    // @field: Subtitle text, lines joined with the file's line break
    pub text: String,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(seq_num: u32, start_time_ms: u64, end_time_ms: u64, text: impl Into<String>) -> Self {
        SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text: text.into(),
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        time_codec::encode(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        time_codec::encode(self.end_time_ms)
    }

    // @parses: One cue block (index, time range, text lines)
    fn from_block(block_num: usize, block: &str, line_break: &str) -> Result<Self, SubtitleError> {
        let mut lines = block.split(line_break);

        let index_line = lines.next().unwrap_or_default();
        let time_line = lines
            .next()
            .ok_or_else(|| SubtitleError::parse(block_num, "expected an index line and a time line"))?;

        let seq_num = index_line.trim().parse::<u32>().map_err(|_| {
            SubtitleError::parse(block_num, format!("index '{}' is not a number", index_line.trim()))
        })?;

        let times: Vec<&str> = time_line.split(TIME_SEPARATOR).collect();
        if times.len() != 2 {
            return Err(SubtitleError::parse(
                block_num,
                format!("time line '{}' needs exactly one '{}'", time_line, TIME_SEPARATOR.trim()),
            ));
        }

        let start_time_ms = time_codec::decode(times[0])?;
        let end_time_ms = time_codec::decode(times[1])?;
        let text = lines.collect::<Vec<_>>().join(line_break);

        Ok(SubtitleEntry {
            seq_num,
            start_time_ms,
            end_time_ms,
            text,
        })
    }
}

impl fmt::Display for SubtitleEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{}", time_codec::encode_range(self.start_time_ms, self.end_time_ms))?;
        writeln!(f, "{}", self.text)?;
        writeln!(f)
    }
}

/// Subtitle entries keyed by their declared sequence number
///
/// Indices need not start at 1 or be contiguous, so entries live in an
/// ordered map rather than a vector. Iteration is always by ascending index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleCollection {
    entries: BTreeMap<u32, SubtitleEntry>,
}

impl SubtitleCollection {
    /// Create an empty subtitle collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse SRT text into a collection
    ///
    /// Blocks are separated by two consecutive `line_break`s. A later block
    /// with an already seen index replaces the earlier one.
    pub fn parse(content: &str, line_break: &str) -> Result<Self, SubtitleError> {
        let content = content.strip_prefix(BOM).unwrap_or(content);
        let separator = format!("{}{}", line_break, line_break);

        let mut collection = Self::new();
        for (i, block) in content.split(separator.as_str()).enumerate() {
            let block = trim_line_breaks(block, line_break);
            if block.trim().is_empty() {
                continue;
            }

            let entry = SubtitleEntry::from_block(i + 1, block, line_break)?;
            if let Some(previous) = collection.insert(entry) {
                warn!("Subtitle index {} appears more than once, keeping the later entry", previous.seq_num);
            }
        }

        debug!("Parsed {} subtitle entries", collection.len());
        Ok(collection)
    }

    /// Insert an entry, returning the one it replaced (if any)
    pub fn insert(&mut self, entry: SubtitleEntry) -> Option<SubtitleEntry> {
        self.entries.insert(entry.seq_num, entry)
    }

    /// Look up an entry by sequence number
    pub fn get(&self, seq_num: u32) -> Option<&SubtitleEntry> {
        self.entries.get(&seq_num)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending index order
    pub fn iter(&self) -> btree_map::Values<'_, u32, SubtitleEntry> {
        self.entries.values()
    }

    /// Shift every entry from `start_index` onward by `delta_ms`
    ///
    /// The walk covers `start_index`, `start_index + 1`, ... and stops at the
    /// first index with no entry. A backward shift is refused if the first
    /// shifted entry would start before the unshifted entry just before it
    /// ends. Nothing is modified when an error is returned. An unknown
    /// `start_index` shifts nothing.
    ///
    /// Returns the number of entries shifted.
    pub fn shift(&mut self, start_index: u32, delta_ms: i64) -> Result<usize, SubtitleError> {
        let Some(first) = self.entries.get(&start_index) else {
            debug!("No subtitle with index {}, nothing to shift", start_index);
            return Ok(0);
        };

        if delta_ms < 0 {
            let shifted_start_ms = i128::from(first.start_time_ms) + i128::from(delta_ms);
            let previous = start_index
                .checked_sub(1)
                .and_then(|previous_index| self.entries.get(&previous_index));

            if let Some(previous) = previous {
                if i128::from(previous.end_time_ms) > shifted_start_ms {
                    return Err(SubtitleError::Overlap {
                        index: start_index,
                        previous_index: previous.seq_num,
                        previous_end_ms: previous.end_time_ms,
                        shifted_start_ms,
                    });
                }
            }
        }

        let run = self.contiguous_run(start_index);

        // Validate the whole run before touching anything
        let mut shifted = Vec::with_capacity(run.len());
        for &seq_num in &run {
            let entry = &self.entries[&seq_num];
            let start = Self::apply_delta(entry, entry.start_time_ms, delta_ms)?;
            let end = Self::apply_delta(entry, entry.end_time_ms, delta_ms)?;
            shifted.push((seq_num, start, end));
        }

        for (seq_num, start, end) in shifted {
            if let Some(entry) = self.entries.get_mut(&seq_num) {
                entry.start_time_ms = start;
                entry.end_time_ms = end;
            }
        }

        debug!(
            "Shifted {} subtitle entries from index {} by {}ms",
            run.len(),
            start_index,
            delta_ms
        );
        Ok(run.len())
    }

    // @returns: Indices start_index, start_index + 1, ... up to the first gap
    fn contiguous_run(&self, start_index: u32) -> Vec<u32> {
        let mut run = Vec::new();
        let mut next = Some(start_index);
        while let Some(seq_num) = next.filter(|n| self.entries.contains_key(n)) {
            run.push(seq_num);
            next = seq_num.checked_add(1);
        }
        run
    }

    fn apply_delta(entry: &SubtitleEntry, time_ms: u64, delta_ms: i64) -> Result<u64, SubtitleError> {
        time_ms
            .checked_add_signed(delta_ms)
            .ok_or(SubtitleError::NegativeTime {
                index: entry.seq_num,
                time_ms,
                delta_ms,
            })
    }

    /// Render the collection as SRT text
    ///
    /// Entries are separated by a blank line; the output ends with the last
    /// entry's text, without a trailing line break.
    pub fn render(&self, line_break: &str) -> String {
        let mut output = String::new();
        for entry in self.iter() {
            output.push_str(&entry.seq_num.to_string());
            output.push_str(line_break);
            output.push_str(&time_codec::encode_range(entry.start_time_ms, entry.end_time_ms));
            output.push_str(line_break);
            output.push_str(&entry.text);
            output.push_str(line_break);
            output.push_str(line_break);
        }

        let separator_len = 2 * line_break.len();
        output.truncate(output.len().saturating_sub(separator_len));

        debug!("Rendered {} subtitle entries ({} bytes)", self.len(), output.len());
        output
    }
}

impl<'a> IntoIterator for &'a SubtitleCollection {
    type Item = &'a SubtitleEntry;
    type IntoIter = btree_map::Values<'a, u32, SubtitleEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<SubtitleEntry> for SubtitleCollection {
    fn from_iter<I: IntoIterator<Item = SubtitleEntry>>(iter: I) -> Self {
        let mut collection = Self::new();
        for entry in iter {
            collection.insert(entry);
        }
        collection
    }
}
