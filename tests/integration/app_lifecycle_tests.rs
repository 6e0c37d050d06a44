/*!
 * Full app lifecycle tests: request files in, timeline files out
 */

use anyhow::Result;

use autoedit::app_config::Config;
use autoedit::app_controller::Controller;
use autoedit::file_utils::FileManager;
use autoedit::planner::Layout;
use autoedit::PipelineOutput;
use crate::common;

fn write_request(dir: &std::path::Path, request: &autoedit::PipelineInput) -> Result<std::path::PathBuf> {
    let path = dir.join("request.json");
    FileManager::write_json(&path, request)?;
    Ok(path)
}

/// Test planning a request end to end through the controller
#[test]
fn test_plan_shouldWriteTimelineAndReport() -> Result<()> {
    common::init_test_logging();
    let temp_dir = common::create_temp_dir()?;
    let request_path = write_request(temp_dir.path(), &common::widget_request())?;
    let output_path = temp_dir.path().join("out").join("edit.json");

    let controller = Controller::new_for_test()?;
    let report = controller.plan(&request_path, Some(&output_path), 7, None, false)?;

    assert_eq!(report.output_path, output_path);
    assert!(FileManager::file_exists(&output_path));
    // default bounds keep the whole pitch in one segment
    assert_eq!(report.stats.item_count, 1);
    assert_eq!(report.stats.layout_counts.get("C"), Some(&1));
    assert_eq!(report.unmatched_segments, 0);
    assert_eq!(report.warning_count, 0);

    let written: PipelineOutput = FileManager::read_json(&output_path)?;
    assert_eq!(written.timeline.fingerprint()?, report.fingerprint);
    assert_eq!(written.timeline.items[0].layout, Layout::C);
    Ok(())
}

/// Test the default output location next to the request
#[test]
fn test_plan_withoutOutputPath_shouldWriteNextToRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let request_path = write_request(temp_dir.path(), &common::dashboard_request())?;

    let report = Controller::new_for_test()?.plan(&request_path, None, 0, None, false)?;

    assert_eq!(report.output_path, temp_dir.path().join("request.timeline.json"));
    assert!(FileManager::file_exists(&report.output_path));
    Ok(())
}

/// Test that the same seed gives the same fingerprint across runs
#[test]
fn test_plan_withSameSeed_shouldRepeatFingerprint() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let request_path = write_request(temp_dir.path(), &common::dashboard_request())?;
    let controller = Controller::new_for_test()?;

    let first = controller.plan(&request_path, Some(&temp_dir.path().join("a.json")), 11, None, false)?;
    let second = controller.plan(&request_path, Some(&temp_dir.path().join("b.json")), 11, None, false)?;

    assert_eq!(first.fingerprint, second.fingerprint);
    Ok(())
}

/// Test that media found in an assets directory joins the request
#[test]
fn test_load_request_withAssetsDir_shouldMergeMedia() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let assets_dir = temp_dir.path().join("assets");
    common::create_test_file(&assets_dir, "widget-x-demo.mp4", "")?;
    common::create_test_file(&assets_dir, "sfx/click.wav", "")?;

    let mut request = common::request(common::WIDGET_SCRIPT, 6.0);
    request.sfx = request.sfx.with(autoedit::planner::SfxSlot::Click, "custom/click.wav");
    let request_path = write_request(temp_dir.path(), &request)?;

    let controller = Controller::new_for_test()?;
    let loaded = controller.load_request(&request_path, Some(&assets_dir))?;

    assert_eq!(loaded.helper_videos.len(), 1);
    assert!(loaded.helper_videos[0].ends_with("widget-x-demo.mp4"));
    // slots named in the request win over scanned files
    assert_eq!(loaded.sfx.0.get("click").map(String::as_str), Some("custom/click.wav"));

    let output = controller.run_with_progress(&loaded, 1, false)?;
    assert_eq!(output.timeline.items[0].layout, Layout::C);
    Ok(())
}

/// Test failures for missing inputs
#[test]
fn test_plan_withMissingInputs_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::new_for_test()?;

    let missing = temp_dir.path().join("nope.json");
    assert!(controller.plan(&missing, None, 0, None, false).is_err());

    let request_path = write_request(temp_dir.path(), &common::widget_request())?;
    let missing_assets = temp_dir.path().join("no-assets");
    assert!(controller.load_request(&request_path, Some(&missing_assets)).is_err());

    let broken = common::create_test_file(temp_dir.path(), "broken.json", r#"{ "script": 3 }"#)?;
    assert!(controller.load_request(&broken, None).is_err());
    Ok(())
}

/// Test that an invalid request surfaces the pipeline error
#[test]
fn test_plan_withEmptyScript_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let request_path = write_request(temp_dir.path(), &common::request("", 4.0))?;

    let result = Controller::new_for_test()?.plan(&request_path, None, 0, None, false);

    let error = result.err().map(|e| e.to_string()).unwrap_or_default();
    assert!(error.contains("Script is empty"));
    Ok(())
}

/// Test script estimation
#[test]
fn test_estimate_shouldCountWordsAndFrames() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let script = common::create_test_file(temp_dir.path(), "script.txt", common::LONG_SCRIPT)?;

    let controller = Controller::new_for_test()?;
    let estimate = controller.estimate(&script)?;

    assert_eq!(estimate.word_count, 56);
    assert_eq!(estimate.segment_count, 3);
    assert!(estimate.estimated_frames > 0);
    assert!((estimate.estimated_seconds - estimate.estimated_frames as f64 / 30.0).abs() < 1e-9);

    let empty = common::create_test_file(temp_dir.path(), "empty.txt", "   ")?;
    assert!(controller.estimate(&empty).is_err());
    Ok(())
}

/// Test that the controller keeps the configuration it was given
#[test]
fn test_with_config_shouldUseGivenConfig() -> Result<()> {
    let mut config = Config::default();
    config.project.fps = 25;
    let controller = Controller::with_config(config)?;
    assert_eq!(controller.config().project.fps, 25);

    let mut broken = Config::default();
    broken.segmentation.min_segment_words = 50;
    assert!(Controller::with_config(broken).is_err());
    Ok(())
}
