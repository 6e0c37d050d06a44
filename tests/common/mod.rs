/*!
 * Common test utilities for the autoedit test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use autoedit::analysis::{extract_keywords, Importance};
use autoedit::planner::SfxLibrary;
use autoedit::script::ScriptSegment;
use autoedit::timing::Frame;
use autoedit::{AvatarInput, PipelineInput};

/// The product pitch used across scenario tests
pub const WIDGET_SCRIPT: &str = "Introducing Widget X. It costs $20. Buy it now.";

/// A longer script with several sentences of mixed importance
pub const LONG_SCRIPT: &str = "Most people lose hours every week to messy spreadsheets. \
    Our dashboard pulls every number into one place. \
    You can track revenue, churn and signups in real time. \
    Teams using it report saving 5 hours per week. \
    The setup takes less than ten minutes and needs no engineers. \
    Try it today and see the difference for yourself.";

/// Routes library logs to the test output; safe to call from every test
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Builds a request for the given script with no helper media
pub fn request(script: &str, duration_seconds: f64) -> PipelineInput {
    PipelineInput {
        script: script.to_string(),
        avatar: AvatarInput {
            source: "media/avatar.mp4".to_string(),
            duration_seconds,
            silences: Vec::new(),
        },
        helper_videos: Vec::new(),
        helper_images: Vec::new(),
        sfx: SfxLibrary::new(),
        editorial_decisions: None,
    }
}

/// The Widget X request with one matching helper video
pub fn widget_request() -> PipelineInput {
    let mut request = request(WIDGET_SCRIPT, 6.0);
    request.helper_videos = vec!["media/widget-x-demo.mp4".to_string()];
    request
}

/// A request with helper media and a full sfx library
pub fn dashboard_request() -> PipelineInput {
    let mut request = request(LONG_SCRIPT, 24.0);
    request.helper_videos = vec![
        "media/dashboard-overview.mp4".to_string(),
        "media/revenue-chart.mov".to_string(),
    ];
    request.helper_images = vec!["media/setup-steps.png".to_string()];
    request.sfx = SfxLibrary(
        [
            ("click", "sfx/click.wav"),
            ("swoosh", "sfx/swoosh.wav"),
            ("impact", "sfx/impact.wav"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    );
    request
}

/// Builds a standalone segment for unit tests
pub fn segment(id: &str, text: &str, importance: Importance, start: Frame, end: Frame) -> ScriptSegment {
    ScriptSegment {
        id: id.to_string(),
        text: text.to_string(),
        words: Vec::new(),
        start_frame: start,
        end_frame: end,
        duration_frames: end - start,
        keywords: extract_keywords(text),
        importance,
        is_key_phrase: false,
    }
}
