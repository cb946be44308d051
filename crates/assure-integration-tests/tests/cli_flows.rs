//! # CLI Flow Tests
//!
//! Exercises the CLI subcommand handlers end to end against real answer
//! files on disk, checking the exit codes a CI pipeline would see.

use std::io::Write;

use assure_cli::score::{run_score, ScoreArgs};
use assure_cli::validate::{run_validate, ValidateArgs};

fn write_answers(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{json}").unwrap();
    file
}

/// Every required GDPR question answered yes.
const GDPR_ALL_YES: &str = r#"{
    "gdpr-art6-q1": {"value": {"kind": "yes"}},
    "gdpr-art6-q2": {"value": {"kind": "yes"}},
    "gdpr-art15-q1": {"value": {"kind": "yes"}},
    "gdpr-art30-q1": {"value": {"kind": "yes"}},
    "gdpr-art30-q2": {"value": {"kind": "yes"}},
    "gdpr-art32-q1": {"value": {"kind": "yes"}},
    "gdpr-art32-q2": {"value": {"kind": "yes"}},
    "gdpr-art33-q1": {"value": {"kind": "yes"}},
    "gdpr-art33-q2": {"value": {"kind": "yes"}}
}"#;

#[test]
fn validate_complete_file_exits_zero() {
    let file = write_answers(GDPR_ALL_YES);
    let args = ValidateArgs {
        path: file.path().to_path_buf(),
        framework: "gdpr".to_string(),
    };
    assert_eq!(run_validate(&args).unwrap(), 0);
}

#[test]
fn validate_incomplete_file_exits_one() {
    let file = write_answers(r#"{"gdpr-art6-q1": {"value": {"kind": "yes"}}}"#);
    let args = ValidateArgs {
        path: file.path().to_path_buf(),
        framework: "gdpr".to_string(),
    };
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn validate_unknown_question_exits_one() {
    let file = write_answers(r#"{"not-a-question": {"value": {"kind": "yes"}}}"#);
    let args = ValidateArgs {
        path: file.path().to_path_buf(),
        framework: "gdpr".to_string(),
    };
    assert_eq!(run_validate(&args).unwrap(), 1);
}

#[test]
fn score_matches_validate_view_of_the_same_file() {
    let file = write_answers(GDPR_ALL_YES);

    let validate_args = ValidateArgs {
        path: file.path().to_path_buf(),
        framework: "gdpr".to_string(),
    };
    assert_eq!(run_validate(&validate_args).unwrap(), 0);

    let score_args = ScoreArgs {
        path: file.path().to_path_buf(),
        framework: "gdpr".to_string(),
        json: false,
        strict: true,
    };
    assert_eq!(run_score(&score_args).unwrap(), 0);
}

#[test]
fn missing_file_is_an_error() {
    let args = ScoreArgs {
        path: std::path::PathBuf::from("/nonexistent/answers.json"),
        framework: "gdpr".to_string(),
        json: false,
        strict: false,
    };
    assert!(run_score(&args).is_err());
}
