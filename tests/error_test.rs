//! Tests for error types

use std::path::PathBuf;

use trial_report::Error;

#[test]
fn test_corrupt_trial_file_error() {
    let error = Error::CorruptTrialFile {
        path: PathBuf::from("results/sequence_trials_10M.json"),
        message: "expected value at line 1 column 1".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Corrupt trial file"));
    assert!(error_str.contains("sequence_trials_10M.json"));
    assert!(error_str.contains("line 1 column 1"));
    assert!(error_str.contains("Re-export the search log"));
}

#[test]
fn test_invalid_config_error() {
    let error = Error::InvalidConfig("max_iter must be positive".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid report configuration"));
    assert!(error_str.contains("max_iter"));
}

#[test]
fn test_invalid_input_error() {
    let error = Error::InvalidInput("unknown model family: rnn".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Invalid input"));
    assert!(error_str.contains("rnn"));
}

#[test]
fn test_dataset_error() {
    let error = Error::DatasetError("missing user_id column".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Dataset error"));
    assert!(error_str.contains("user_id"));
}

#[test]
fn test_render_error() {
    let error = Error::RenderError("font not found".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("Render error"));
    assert!(error_str.contains("font not found"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("file not found"));
}

#[test]
fn test_other_error() {
    let error = Error::Other("custom error message".to_string());
    assert_eq!(format!("{error}"), "custom error message");
}

#[test]
fn test_error_debug_format() {
    let error = Error::InvalidInput("test".to_string());
    let debug_str = format!("{error:?}");
    assert!(debug_str.contains("InvalidInput"));
}
