/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use autoedit::app_config::{Config, LogLevel};
use crate::common;

/// Test default configuration creation
#[test]
fn test_default_config_shouldHaveExpectedValues() {
    let config = Config::default();

    assert_eq!(config.project.fps, 30);
    assert_eq!((config.project.width, config.project.height), (1080, 1920));
    assert_eq!(config.project.silence_threshold_seconds, 0.5);
    assert_eq!(config.project.min_clip_duration_seconds, 1.0);
    assert_eq!(config.project.merge_tolerance_frames, 3);
    assert!(config.project.trim_silence);
    assert_eq!(config.segmentation.min_segment_words, 5);
    assert_eq!(config.segmentation.max_segment_words, 25);
    assert_eq!(config.matching.min_relevance_score, 0.2);
    assert_eq!(config.matching.max_assets_per_segment, 1);
    assert!(!config.matching.allow_asset_reuse);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.importance.high_impact_patterns.is_empty());
    assert!(config.validate().is_ok());
}

/// Test that invalid settings are rejected
#[test]
fn test_validate_withInvalidValues_shouldFail() {
    let mut config = Config::default();
    config.project.fps = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.segmentation.min_segment_words = 30;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.matching.min_relevance_score = 1.5;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.matching.max_assets_per_segment = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.project.transition_sfx_probability = -0.1;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.importance.call_to_action_patterns = vec!["(unclosed".to_string()];
    assert!(config.validate().is_err());
}

/// Test saving and loading a configuration file
#[test]
fn test_save_and_from_file_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("autoedit.json");

    let mut config = Config::default();
    config.project.fps = 25;
    config.matching.allow_asset_reuse = true;
    config.log_level = LogLevel::Debug;
    config.save(&path)?;

    let loaded = Config::from_file(&path)?;
    assert_eq!(loaded, config);
    Ok(())
}

/// Test that missing sections and fields fall back to defaults
#[test]
fn test_from_file_withPartialJson_shouldFillDefaults() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(
        temp_dir.path(),
        "partial.json",
        r#"{ "project": { "fps": 24 }, "log_level": "warn" }"#,
    )?;

    let config = Config::from_file(&path)?;

    assert_eq!(config.project.fps, 24);
    assert_eq!(config.project.width, 1080);
    assert_eq!(config.segmentation.max_segment_words, 25);
    assert_eq!(config.log_level, LogLevel::Warn);
    assert_eq!(config.log_level.to_level_filter(), log::LevelFilter::Warn);
    Ok(())
}

/// Test loading a malformed or missing file
#[test]
fn test_from_file_withBadInput_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.json", "{ not json")?;

    assert!(Config::from_file(&path).is_err());
    assert!(Config::from_file(temp_dir.path().join("missing.json")).is_err());
    Ok(())
}

/// Test that stage settings are derived from the project settings
#[test]
fn test_stage_configs_shouldMirrorProjectSettings() {
    let mut config = Config::default();
    config.project.fps = 60;
    config.project.transition_duration_frames = 14;
    config.project.overlay_style = "bold".to_string();
    config.segmentation.min_segment_words = 2;

    assert_eq!(config.clip_generator_config().fps, 60);
    assert_eq!(config.builder_config().fps, 60);
    assert_eq!(config.builder_config().fallback_transition_frames, 14);
    assert_eq!(config.planner_config().transitions.duration_frames, 14);
    assert_eq!(config.planner_config().overlay_style, "bold");
    assert_eq!(config.decision_defaults().transition_duration_frames, 14);
    assert_eq!(config.segmenter_config().min_segment_words, 2);
    assert!(config.importance_rules().is_ok());
}
