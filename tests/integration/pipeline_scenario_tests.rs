/*!
 * End-to-end pipeline scenarios
 */

use rand::rngs::StdRng;
use rand::SeedableRng;

use autoedit::analysis::Importance;
use autoedit::app_config::Config;
use autoedit::clips::SilenceRange;
use autoedit::errors::PipelineError;
use autoedit::planner::{Layout, TransitionType};
use autoedit::timeline::{EditorialDecision, EditorialDecisions};
use autoedit::{EditPipeline, PipelineEvent, PipelineOutput, PipelineStage, Timeline};
use crate::common;

fn pipeline(min_words: usize, max_words: usize) -> EditPipeline {
    let mut config = Config::default();
    config.segmentation.min_segment_words = min_words;
    config.segmentation.max_segment_words = max_words;
    EditPipeline::new(config).unwrap()
}

fn assert_well_formed(timeline: &Timeline) {
    let mut cursor = 0;
    for item in &timeline.items {
        assert_eq!(item.start_frame, cursor, "{} is not contiguous", item.id);
        assert!(item.duration_frames > 0);
        if item.layout.needs_helper() {
            assert!(item.helper_asset.is_some(), "{} has no helper", item.id);
        }
        cursor = item.end_frame;
    }
    assert_eq!(cursor, timeline.total_duration_frames);
    assert_eq!(
        timeline.items.first().map(|i| i.transition.transition_type),
        Some(TransitionType::None)
    );
}

#[test]
fn test_widget_scenario_shouldShowHelperThenAvatar() {
    let output = pipeline(3, 8).run_seeded(&common::widget_request(), 42).unwrap();

    assert_eq!(output.segments.len(), 2);
    assert_eq!(output.segments[0].text, "Introducing Widget X. It costs $20.");
    assert_eq!(output.segments[0].end_frame, 120);

    let items = &output.timeline.items;
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].layout, Layout::C);
    assert_eq!(
        items[0].helper_asset.as_ref().map(|a| a.source.as_str()),
        Some("media/widget-x-demo.mp4")
    );
    assert_eq!(items[1].layout, Layout::A);
    assert!(items[1].helper_asset.is_none());
    assert!(matches!(
        items[1].transition.transition_type,
        TransitionType::SlideRight | TransitionType::Fade
    ));

    assert_eq!(output.timeline.total_duration_frames, 180);
    assert!(output.validation.valid);
    assert!(output.warnings.is_empty());
    assert_eq!(output.unmatched_segments, vec!["segment-2"]);
    assert!(output.unused_assets.is_empty());
    assert_well_formed(&output.timeline);
}

#[test]
fn test_widget_scenario_withoutAssets_shouldUseAvatarOnly() {
    let mut request = common::widget_request();
    request.helper_videos.clear();

    let output = pipeline(3, 5).run_seeded(&request, 1).unwrap();
    let items = &output.timeline.items;

    assert_eq!(items.len(), 3);
    assert!(items.iter().all(|i| i.layout == Layout::A));
    assert!(items.iter().all(|i| i.duration_frames == 60));
    let overlay = items[0].text_overlay.as_ref().unwrap();
    assert!(overlay.text.contains("WIDGET"));
    assert!(overlay.start_frame >= items[0].start_frame && overlay.end_frame <= items[0].end_frame);
    assert!(output.validation.valid);
    assert_eq!(output.unmatched_segments.len(), 3);
    assert_well_formed(&output.timeline);
}

#[test]
fn test_run_withSameSeed_shouldProduceIdenticalOutput() {
    let pipeline = EditPipeline::with_defaults().unwrap();
    let request = common::dashboard_request();

    let first = pipeline.run_seeded(&request, 2024).unwrap();
    let second = pipeline.run_seeded(&request, 2024).unwrap();

    assert_eq!(
        serde_json::to_string(&first.timeline).unwrap(),
        serde_json::to_string(&second.timeline).unwrap()
    );
    assert_eq!(first.timeline.fingerprint().unwrap(), second.timeline.fingerprint().unwrap());
    assert_eq!(first.decisions, second.decisions);
}

#[test]
fn test_dashboard_scenario_shouldRespectLayoutRules() {
    let request = common::dashboard_request();
    let output = EditPipeline::with_defaults().unwrap().run_seeded(&request, 9).unwrap();

    assert_eq!(output.segments.len(), 3);
    assert_eq!(output.timeline.total_duration_frames, 720);
    assert!(output.validation.valid);
    assert_well_formed(&output.timeline);

    let mut used_sources = Vec::new();
    for (item, segment) in output.timeline.items.iter().zip(&output.segments) {
        let matched = !output.unmatched_segments.contains(&segment.id);
        match item.layout {
            Layout::C => assert!(matched && segment.importance == Importance::High),
            Layout::B => assert!(matched && segment.importance != Importance::High),
            Layout::A => assert!(!matched),
        }
        if let Some(asset) = &item.helper_asset {
            assert!(!used_sources.contains(&asset.source), "asset reused");
            used_sources.push(asset.source.clone());
        }
    }
    assert_eq!(used_sources.len() + output.unused_assets.len(), 3);
}

#[test]
fn test_run_withSilences_shouldTrimAndRealign() {
    let mut request = common::request(common::WIDGET_SCRIPT, 10.0);
    request.avatar.silences = vec![SilenceRange::new(2.0, 3.0)];

    let output = pipeline(3, 5).run_seeded(&request, 3).unwrap();
    let avatar = &output.processed_avatar;

    assert_eq!(avatar.original_duration_frames, 300);
    assert_eq!(avatar.processed_duration_frames, 270);
    assert_eq!(avatar.clips.len(), 2);
    assert_eq!(output.segments.last().unwrap().end_frame, 270);
    assert_eq!(output.timeline.total_duration_frames, avatar.processed_duration_frames);
    assert!(output.validation.valid);
    assert!(output.warnings.is_empty());
    assert_well_formed(&output.timeline);

    // speech after the cut stays with the first sentence
    let first = &output.timeline.items[0];
    assert_eq!(first.duration_frames, 90);
    assert_eq!(first.continuation_clips.len(), 1);
    assert_eq!(first.continuation_clips[0].original_start_frame, 90);
    assert_eq!(first.continuation_clips[0].original_end_frame, 120);
    assert_eq!(output.timeline.items[1].avatar_clip.original_start_frame, 120);

    let mut played_frames = 0;
    for item in &output.timeline.items {
        for slice in item.avatar_slices() {
            let inside = avatar.clips.iter().any(|clip| {
                slice.original_start_frame >= clip.original_start_frame
                    && slice.original_end_frame <= clip.original_end_frame
            });
            assert!(inside, "{} plays a trimmed silence", item.id);
            played_frames += slice.original_duration_frames();
        }
    }
    assert_eq!(played_frames, avatar.processed_duration_frames);
}

#[test]
fn test_run_withTrimmingDisabled_shouldKeepFullAvatar() {
    let mut config = Config::default();
    config.project.trim_silence = false;
    let mut request = common::request(common::WIDGET_SCRIPT, 10.0);
    request.avatar.silences = vec![SilenceRange::new(2.0, 3.0)];

    let output = EditPipeline::new(config).unwrap().run_seeded(&request, 3).unwrap();

    assert!(output.processed_avatar.is_single_clip());
    assert_eq!(output.timeline.total_duration_frames, 300);
}

#[test]
fn test_run_withEditorialDecisions_shouldBypassMatching() {
    let mut decisions = EditorialDecisions::new();
    let mut hero = EditorialDecision::new(Layout::C);
    hero.asset = Some("media/widget-x-demo.mp4".to_string());
    decisions.insert("segment-1", hero);
    let mut closing = EditorialDecision::new(Layout::A);
    closing.transition_type = Some(TransitionType::Cut);
    decisions.insert("segment-3", closing);

    let mut request = common::widget_request();
    request.editorial_decisions = Some(decisions);

    let mut started = Vec::new();
    let mut observer = |event: &PipelineEvent| {
        if let PipelineEvent::StageStarted(stage) = event {
            started.push(*stage);
        }
    };
    let output = pipeline(3, 5)
        .run(&request, &mut StdRng::seed_from_u64(4), &mut observer)
        .unwrap();

    assert!(!started.contains(&PipelineStage::Matching));
    let items = &output.timeline.items;
    assert_eq!(items[0].layout, Layout::C);
    assert_eq!(items[1].layout, Layout::A);
    assert_eq!(items[1].transition.transition_type, TransitionType::Fade);
    assert_eq!(items[2].transition.transition_type, TransitionType::Cut);
    assert_eq!(items[2].transition.duration_frames, 0);

    assert_eq!(output.warnings.len(), 1);
    assert!(output.warnings[0].contains("segment-2"));
    assert_eq!(output.unmatched_segments, vec!["segment-2", "segment-3"]);
    assert!(output.unused_assets.is_empty());
}

#[test]
fn test_run_shouldReportEveryStageAndDecision() {
    let mut events = Vec::new();
    let mut observer = |event: &PipelineEvent| events.push(event.clone());

    let output = pipeline(3, 8)
        .run(&common::widget_request(), &mut StdRng::seed_from_u64(42), &mut observer)
        .unwrap();

    let completed: Vec<(PipelineStage, usize)> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::StageCompleted { stage, count } => Some((*stage, *count)),
            _ => None,
        })
        .collect();
    assert_eq!(completed.len(), PipelineStage::ALL.len());
    assert_eq!(completed[0], (PipelineStage::Segmentation, 2));
    assert_eq!(completed[2], (PipelineStage::Matching, 1));

    let decided: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            PipelineEvent::DecisionMade { segment_id, .. } => Some(segment_id.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(decided, vec!["segment-1", "segment-2"]);
    assert_eq!(output.decisions.len(), 2);
}

#[test]
fn test_output_shouldSerializeForRenderer() {
    let output = pipeline(3, 8).run_seeded(&common::widget_request(), 42).unwrap();

    let json = serde_json::to_string(&output).unwrap();
    let parsed: PipelineOutput = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.timeline, output.timeline);
    assert!(json.contains("\"total_duration_frames\":180"));
    assert!(json.contains("\"layout\":\"C\""));
}

#[test]
fn test_run_withInvalidInput_shouldFail() {
    let pipeline = EditPipeline::with_defaults().unwrap();

    let empty = common::request("  \n ", 5.0);
    assert!(matches!(pipeline.run_seeded(&empty, 1), Err(PipelineError::EmptyScript)));

    let no_duration = common::request(common::WIDGET_SCRIPT, 0.0);
    assert!(matches!(
        pipeline.run_seeded(&no_duration, 1),
        Err(PipelineError::InvalidDuration { .. })
    ));

    let mut no_source = common::widget_request();
    no_source.avatar.source = String::new();
    assert!(matches!(pipeline.run_seeded(&no_source, 1), Err(PipelineError::MissingAvatarSource)));
}
