/*!
 * Tests for error types and conversions
 */

use subshift::errors::SubtitleError;

#[test]
fn test_subtitleError_format_shouldDisplayValue() {
    let error = SubtitleError::Format { value: "1:2".to_string() };
    let display = format!("{}", error);
    assert!(display.contains("Invalid SubRip timestamp"));
    assert!(display.contains("1:2"));
}

#[test]
fn test_subtitleError_overlap_shouldDisplayBothIndices() {
    let error = SubtitleError::Overlap {
        index: 12,
        previous_index: 11,
        previous_end_ms: 2000,
        shifted_start_ms: 1500,
    };
    let display = format!("{}", error);
    assert!(display.contains("Cannot overlap backward shift"));
    assert!(display.contains("12"));
    assert!(display.contains("11"));
    assert!(display.contains("1500ms"));
}

#[test]
fn test_subtitleError_notParsed_shouldDisplayCorrectly() {
    assert_eq!(SubtitleError::NotParsed.to_string(), "File has not been parsed yet");
}

#[test]
fn test_subtitleError_fromIoError_shouldWrapAsIo() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
    let error: SubtitleError = io_error.into();
    assert!(matches!(error, SubtitleError::Io(_)));
    assert!(error.to_string().contains("File not found"));
}
