/*!
 * # subshift - SubRip subtitle shifter
 *
 * A Rust library for moving SubRip (.srt) subtitles in time.
 *
 * ## Features
 *
 * - Parse SubRip text (optionally BOM-prefixed) into subtitles keyed by index
 * - Shift every subtitle from a given index onward by a signed amount
 * - Refuse backward shifts that would overlap the preceding subtitle
 * - Render the result back to SubRip text
 * - CRLF, LF or auto-detected line breaks
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `time_codec`: `HH:MM:SS,mmm` to milliseconds and back
 * - `subtitle_processor`: subtitle entries, parsing, shifting and rendering
 * - `shifter`: the parse/shift/render session used by front ends
 * - `app_config`: Configuration management
 * - `app_controller`: Runs one shift from a source file to a destination
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod shifter;
pub mod subtitle_processor;
pub mod time_codec;

// Re-export main types for easier usage
pub use app_config::{Config, LineEnding, ShiftOperation};
pub use errors::SubtitleError;
pub use shifter::{ShiftRequest, SubtitleShifter};
pub use subtitle_processor::{SubtitleCollection, SubtitleEntry};
