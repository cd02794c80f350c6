/*!
 * Tests for application controller functionality
 */

use std::path::PathBuf;
use anyhow::Result;
use subshift::app_config::Config;
use subshift::app_controller::{parse_time_arg, Controller, OutputTarget, ShiftJob, ShiftReport};
use subshift::file_utils::FileManager;
use crate::common;

/// Test creating a controller with the default configuration
#[test]
fn test_new_with_default_config_shouldSucceed() -> Result<()> {
    let controller = Controller::new_for_test()?;
    assert_eq!(controller.config, Config::default());
    Ok(())
}

#[test]
fn test_with_config_withInvalidConfig_shouldFail() {
    let config = Config {
        max_shift_ms: 0,
        ..Config::default()
    };

    assert!(Controller::with_config(config).is_err());
}

#[test]
fn test_parse_time_arg_withCommaOrDot_shouldConvertToMilliseconds() -> Result<()> {
    assert_eq!(parse_time_arg("2,345")?, 2345);
    assert_eq!(parse_time_arg("2.345")?, 2345);
    assert_eq!(parse_time_arg("0.5")?, 500);
    assert_eq!(parse_time_arg("1,05")?, 1050);
    assert_eq!(parse_time_arg("10")?, 10_000);
    assert_eq!(parse_time_arg(" 3 ")?, 3_000);
    Ok(())
}

#[test]
fn test_parse_time_arg_withInvalidInput_shouldFail() {
    for bad in ["", "-1", "1,2345", "abc", "1:00", ",5", "99999999999999999999"] {
        assert!(parse_time_arg(bad).is_err(), "accepted {:?}", bad);
    }
}

#[test]
fn test_outputTarget_fromDash_shouldBeStdout() {
    assert_eq!(OutputTarget::from(PathBuf::from("-")), OutputTarget::Stdout);
    assert_eq!(
        OutputTarget::from(PathBuf::from("out.srt")),
        OutputTarget::File(PathBuf::from("out.srt"))
    );
}

#[test]
fn test_outputTarget_resolve_withoutDest_shouldDeriveShiftedPath() {
    assert_eq!(
        OutputTarget::resolve("/tmp/input/movie.srt", None),
        OutputTarget::File(PathBuf::from("/tmp/input/movie.shifted.srt"))
    );
    assert_eq!(
        OutputTarget::resolve("/tmp/input/movie.srt", Some(PathBuf::from("-"))),
        OutputTarget::Stdout
    );
    assert_eq!(
        OutputTarget::resolve("movie.srt", Some(PathBuf::from("out.srt"))),
        OutputTarget::File(PathBuf::from("out.srt"))
    );
}

#[test]
fn test_run_withDerivedOutput_shouldWriteNextToInput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "episode.srt")?;

    let controller = Controller::new_for_test()?;
    let job = ShiftJob {
        output: OutputTarget::resolve(&input, None),
        input_file: input,
        index: 1,
        delta_ms: 500,
    };
    controller.run(&job, false)?;

    let written = FileManager::read_to_string(temp_dir.path().join("episode.shifted.srt"))?;
    assert!(written.starts_with("1\r\n00:00:01,500 --> 00:00:02,500\r\nA"));
    Ok(())
}

#[test]
fn test_run_withValidJob_shouldWriteShiftedFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "in.srt")?;
    let output = temp_dir.path().join("out.srt");

    let controller = Controller::new_for_test()?;
    let job = ShiftJob {
        input_file: input,
        output: OutputTarget::File(output.clone()),
        index: 2,
        delta_ms: 2345,
    };

    let report = controller.run(&job, false)?;

    assert_eq!(report, ShiftReport { total_entries: 2, shifted_entries: 1 });
    let written = FileManager::read_to_string(&output)?;
    assert!(written.contains("2\r\n00:00:05,345 --> 00:00:06,345\r\nB"));
    assert!(written.starts_with("1\r\n00:00:01,000 --> 00:00:02,000\r\nA"));
    Ok(())
}

#[test]
fn test_run_withExistingOutput_shouldRequireForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "in.srt")?;
    let output = common::create_test_file(temp_dir.path(), "out.srt", "old")?;

    let controller = Controller::new_for_test()?;
    let job = ShiftJob {
        input_file: input,
        output: OutputTarget::File(output.clone()),
        index: 1,
        delta_ms: 100,
    };

    assert!(controller.run(&job, false).is_err());
    assert_eq!(FileManager::read_to_string(&output)?, "old");

    controller.run(&job, true)?;
    assert_ne!(FileManager::read_to_string(&output)?, "old");
    Ok(())
}

#[test]
fn test_run_withOverlappingShift_shouldNotWriteOutput() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "in.srt")?;
    let output = temp_dir.path().join("out.srt");

    let controller = Controller::new_for_test()?;
    let job = ShiftJob {
        input_file: input,
        output: OutputTarget::File(output.clone()),
        index: 2,
        delta_ms: -1500,
    };

    let err = controller.run(&job, false).unwrap_err();

    assert!(format!("{:#}", err).contains("Cannot overlap backward shift"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_run_withShiftAboveConfiguredMaximum_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "in.srt")?;

    let controller = Controller::with_config(Config {
        max_shift_ms: 1_000,
        ..Config::default()
    })?;
    let job = ShiftJob {
        input_file: input,
        output: OutputTarget::File(temp_dir.path().join("out.srt")),
        index: 1,
        delta_ms: 5_000,
    };

    assert!(controller.run(&job, false).is_err());
    Ok(())
}

#[test]
fn test_run_withMissingInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;
    let job = ShiftJob {
        input_file: temp_dir.path().join("missing.srt"),
        output: OutputTarget::File(temp_dir.path().join("out.srt")),
        index: 1,
        delta_ms: 0,
    };

    assert!(controller.run(&job, false).is_err());
    Ok(())
}
