/*!
 * Tests for error types and conversions
 */

use autoedit::errors::{AppError, PipelineError};

#[test]
fn test_pipeline_error_display_shouldDescribeFailure() {
    assert_eq!(
        PipelineError::EmptyScript.to_string(),
        "Script is empty: no segments could be produced"
    );
    assert_eq!(
        PipelineError::InvalidDuration { context: "avatar".to_string(), frames: -3 }.to_string(),
        "Invalid duration for avatar: -3 frames"
    );
    assert_eq!(
        PipelineError::InvalidTimeline {
            errors: vec!["first".to_string(), "second".to_string()],
        }
        .to_string(),
        "Timeline is invalid: first; second"
    );
}

#[test]
fn test_pipeline_error_fromRegexError_shouldWrapPattern() {
    let regex_error = regex::Regex::new("(unclosed").unwrap_err();
    let error: PipelineError = regex_error.into();

    assert!(matches!(error, PipelineError::InvalidPattern(_)));
    assert!(error.to_string().starts_with("Invalid pattern:"));
}

#[test]
fn test_app_error_conversions_shouldPickVariant() {
    let from_pipeline: AppError = PipelineError::MissingAvatarSource.into();
    assert!(matches!(from_pipeline, AppError::Pipeline(PipelineError::MissingAvatarSource)));
    assert_eq!(from_pipeline.to_string(), "Pipeline error: Avatar source is missing");

    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let from_io: AppError = io_error.into();
    assert!(matches!(from_io, AppError::File(_)));

    let json_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let from_json: AppError = json_error.into();
    assert!(matches!(from_json, AppError::Serialization(_)));

    let from_anyhow: AppError = anyhow::anyhow!("something odd").into();
    assert_eq!(from_anyhow.to_string(), "Unknown error: something odd");
}
