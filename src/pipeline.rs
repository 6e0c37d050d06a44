/*!
 * End-to-end edit pipeline.
 *
 * The pipeline runs the stages in a fixed order:
 * 1. Segmentation: script text to timed segments
 * 2. Clip generation: silence trimming of the avatar, then segment re-alignment
 * 3. Matching: helper assets to segments (skipped with editorial decisions)
 * 4. Planning: layout, transition and overlay per segment
 * 5. Building: the timeline itself
 * 6. Validation: global re-check and statistics
 *
 * Progress is reported through a `PipelineObserver`; the pipeline itself
 * never prints. The only randomness is the transition choice, drawn from
 * the generator passed in by the caller.
 */

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::app_config::Config;
use crate::assets::{AssetMatcher, AssetType, AssignmentResult, HelperAsset};
use crate::clips::{ClipGenerator, ProcessedAvatar, SilenceRange};
use crate::errors::PipelineError;
use crate::planner::{Layout, LayoutDecision, LayoutPlanner, SfxLibrary};
use crate::script::{ScriptSegment, ScriptSegmenter};
use crate::timeline::{
    compute_stats, validate_timeline, EditorialDecisions, Timeline, TimelineBuilder, TimelineStats,
    ValidationResult,
};
use crate::timing::seconds_to_frames;

/// The talking-head recording
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarInput {
    /// Source reference of the avatar video
    pub source: String,

    pub duration_seconds: f64,

    /// Silence ranges from an external analysis tool
    #[serde(default)]
    pub silences: Vec<SilenceRange>,
}

/// Everything one pipeline run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineInput {
    pub script: String,
    pub avatar: AvatarInput,

    /// Helper video references in preference order
    #[serde(default)]
    pub helper_videos: Vec<String>,

    /// Helper image references in preference order
    #[serde(default)]
    pub helper_images: Vec<String>,

    /// Sound effects keyed by `click`, `swoosh` and `impact`
    #[serde(default)]
    pub sfx: SfxLibrary,

    /// Precomputed decisions that replace matching and planning
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editorial_decisions: Option<EditorialDecisions>,
}

impl PipelineInput {
    /// Parse the helper references into assets, videos first
    pub fn helper_assets(&self) -> Vec<HelperAsset> {
        self.helper_videos
            .iter()
            .map(|source| HelperAsset::from_path(source, AssetType::Video))
            .chain(
                self.helper_images
                    .iter()
                    .map(|source| HelperAsset::from_path(source, AssetType::Image)),
            )
            .collect()
    }
}

/// Pipeline stages in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    Segmentation,
    ClipGeneration,
    Matching,
    Planning,
    Building,
    Validation,
}

impl PipelineStage {
    pub const ALL: [PipelineStage; 6] = [
        PipelineStage::Segmentation,
        PipelineStage::ClipGeneration,
        PipelineStage::Matching,
        PipelineStage::Planning,
        PipelineStage::Building,
        PipelineStage::Validation,
    ];
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::Segmentation => "segmentation",
            PipelineStage::ClipGeneration => "clip generation",
            PipelineStage::Matching => "matching",
            PipelineStage::Planning => "planning",
            PipelineStage::Building => "building",
            PipelineStage::Validation => "validation",
        };
        write!(f, "{}", name)
    }
}

/// Structured progress event
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    StageStarted(PipelineStage),

    /// `count` is the number of items the stage produced
    StageCompleted { stage: PipelineStage, count: usize },

    DecisionMade {
        segment_id: String,
        layout: Layout,
        rationale: String,
    },

    Warning(String),
}

/// Receives pipeline events
pub trait PipelineObserver {
    fn on_event(&mut self, event: &PipelineEvent);
}

impl<F: FnMut(&PipelineEvent)> PipelineObserver for F {
    fn on_event(&mut self, event: &PipelineEvent) {
        self(event)
    }
}

/// Ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {
    fn on_event(&mut self, _event: &PipelineEvent) {}
}

/// Forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PipelineObserver for LogObserver {
    fn on_event(&mut self, event: &PipelineEvent) {
        match event {
            PipelineEvent::StageStarted(stage) => debug!("Starting {}", stage),
            PipelineEvent::StageCompleted { stage, count } => info!("Finished {} ({} items)", stage, count),
            PipelineEvent::DecisionMade { segment_id, layout, rationale } => {
                debug!("{} -> layout {}: {}", segment_id, layout, rationale)
            }
            PipelineEvent::Warning(message) => warn!("{}", message),
        }
    }
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub timeline: Timeline,
    pub validation: ValidationResult,
    pub stats: TimelineStats,
    pub segments: Vec<ScriptSegment>,
    pub processed_avatar: ProcessedAvatar,
    pub decisions: Vec<LayoutDecision>,

    /// Segments no helper asset was assigned to
    pub unmatched_segments: Vec<String>,

    /// Helper asset sources never assigned
    pub unused_assets: Vec<String>,

    /// Consistency warnings from every stage
    pub warnings: Vec<String>,
}

/// Runs the whole script-to-timeline transform
pub struct EditPipeline {
    config: Config,
    segmenter: ScriptSegmenter,
    clip_generator: ClipGenerator,
    matcher: AssetMatcher,
    planner: LayoutPlanner,
    builder: TimelineBuilder,
}

impl EditPipeline {
    /// Create a pipeline from a configuration
    pub fn new(config: Config) -> Result<Self, PipelineError> {
        if config.project.fps == 0 {
            return Err(PipelineError::Config("frame rate must be greater than zero".to_string()));
        }
        if config.segmentation.min_segment_words > config.segmentation.max_segment_words {
            return Err(PipelineError::Config(format!(
                "minimum segment words ({}) exceeds maximum ({})",
                config.segmentation.min_segment_words, config.segmentation.max_segment_words
            )));
        }

        let rules = config.importance_rules()?;
        Ok(Self {
            segmenter: ScriptSegmenter::new(config.segmenter_config(), rules),
            clip_generator: ClipGenerator::new(config.clip_generator_config()),
            matcher: AssetMatcher::new(config.matcher_config()),
            planner: LayoutPlanner::new(config.planner_config()),
            builder: TimelineBuilder::new(config.builder_config()),
            config,
        })
    }

    /// Create a pipeline with the default configuration
    pub fn with_defaults() -> Result<Self, PipelineError> {
        Self::new(Config::default())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run with a fresh generator seeded from `seed`
    pub fn run_seeded(&self, input: &PipelineInput, seed: u64) -> Result<PipelineOutput, PipelineError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(input, &mut rng, &mut NoopObserver)
    }

    /// Run every stage. Structural problems abort the run; consistency
    /// problems are returned as warnings.
    pub fn run<R, O>(&self, input: &PipelineInput, rng: &mut R, observer: &mut O) -> Result<PipelineOutput, PipelineError>
    where
        R: Rng + ?Sized,
        O: PipelineObserver + ?Sized,
    {
        let fps = self.config.project.fps;
        let mut warnings: Vec<String> = Vec::new();

        if input.avatar.source.trim().is_empty() {
            return Err(PipelineError::MissingAvatarSource);
        }
        let original_frames = seconds_to_frames(input.avatar.duration_seconds, fps);
        if original_frames <= 0 {
            return Err(PipelineError::InvalidDuration {
                context: format!("avatar '{}'", input.avatar.source),
                frames: original_frames,
            });
        }

        // 1. segmentation
        observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Segmentation));
        let mut script = self.segmenter.segment(&input.script, original_frames)?;
        observer.on_event(&PipelineEvent::StageCompleted {
            stage: PipelineStage::Segmentation,
            count: script.len(),
        });

        // 2. clip generation
        observer.on_event(&PipelineEvent::StageStarted(PipelineStage::ClipGeneration));
        let processed_avatar = self.process_avatar(&input.avatar);
        if processed_avatar.processed_duration_frames != original_frames {
            debug!(
                "Avatar trimmed from {} to {} frames, re-aligning segments",
                original_frames, processed_avatar.processed_duration_frames
            );
            script = self
                .segmenter
                .realign(&script, processed_avatar.processed_duration_frames)?;
        }
        observer.on_event(&PipelineEvent::StageCompleted {
            stage: PipelineStage::ClipGeneration,
            count: processed_avatar.clips.len(),
        });

        let helper_assets = input.helper_assets();

        // 3 and 4. matching and planning, or the editorial decisions instead
        let (decisions, assignment) = match &input.editorial_decisions {
            Some(record) => {
                observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Planning));
                let (decisions, decision_warnings) =
                    record.resolve(&script.segments, &helper_assets, &self.config.decision_defaults());
                for message in decision_warnings {
                    push_warning(&mut warnings, observer, message);
                }
                let assignment = assignment_from_decisions(&script.segments, &helper_assets, &decisions);
                (decisions, assignment)
            }
            None => {
                observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Matching));
                let assignment = self.matcher.assign(&script.segments, &helper_assets);
                observer.on_event(&PipelineEvent::StageCompleted {
                    stage: PipelineStage::Matching,
                    count: assignment.assignments.len(),
                });

                observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Planning));
                let decisions = self.planner.plan(&script.segments, &assignment, &input.sfx, rng);
                for error in LayoutPlanner::validate(&script.segments, &decisions).errors {
                    push_warning(&mut warnings, observer, error);
                }
                (decisions, assignment)
            }
        };
        for decision in &decisions {
            observer.on_event(&PipelineEvent::DecisionMade {
                segment_id: decision.segment_id.clone(),
                layout: decision.layout,
                rationale: decision.rationale.clone(),
            });
        }
        observer.on_event(&PipelineEvent::StageCompleted {
            stage: PipelineStage::Planning,
            count: decisions.len(),
        });

        // 5. building
        observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Building));
        let build = self.builder.build(&script.segments, &processed_avatar, &decisions)?;
        for message in build.warnings {
            push_warning(&mut warnings, observer, message);
        }
        let timeline = build.timeline;
        observer.on_event(&PipelineEvent::StageCompleted {
            stage: PipelineStage::Building,
            count: timeline.items.len(),
        });

        // 6. validation
        observer.on_event(&PipelineEvent::StageStarted(PipelineStage::Validation));
        let validation = validate_timeline(&timeline);
        if !validation.valid {
            return Err(PipelineError::InvalidTimeline {
                errors: validation.errors,
            });
        }
        for message in &validation.warnings {
            push_warning(&mut warnings, observer, message.clone());
        }
        let stats = compute_stats(&timeline);
        observer.on_event(&PipelineEvent::StageCompleted {
            stage: PipelineStage::Validation,
            count: validation.warnings.len(),
        });

        info!(
            "Timeline ready: {} items, {} frames ({:.2}s), {} warnings",
            stats.item_count,
            stats.total_duration_frames,
            stats.total_duration_seconds,
            warnings.len()
        );

        Ok(PipelineOutput {
            timeline,
            validation,
            stats,
            segments: script.segments,
            processed_avatar,
            decisions,
            unmatched_segments: assignment.unmatched_segments,
            unused_assets: assignment.unused_assets,
            warnings,
        })
    }

    fn process_avatar(&self, avatar: &AvatarInput) -> ProcessedAvatar {
        if !self.config.project.trim_silence || avatar.silences.is_empty() {
            return self.clip_generator.passthrough(&avatar.source, avatar.duration_seconds);
        }

        let processed = self
            .clip_generator
            .generate(&avatar.source, avatar.duration_seconds, &avatar.silences);
        let tolerance = self.config.project.merge_tolerance_frames;
        if tolerance > 0 && processed.clips.len() > 1 {
            processed.merge_micro_cuts(tolerance)
        } else {
            processed
        }
    }
}

fn push_warning<O: PipelineObserver + ?Sized>(warnings: &mut Vec<String>, observer: &mut O, message: String) {
    observer.on_event(&PipelineEvent::Warning(message.clone()));
    warnings.push(message);
}

/// Rebuild the informational assignment lists for the editorial path
fn assignment_from_decisions(
    segments: &[ScriptSegment],
    helper_assets: &[HelperAsset],
    decisions: &[LayoutDecision],
) -> AssignmentResult {
    let unmatched_segments = segments
        .iter()
        .filter(|s| {
            !decisions
                .iter()
                .any(|d| d.segment_id == s.id && d.helper_asset.is_some())
        })
        .map(|s| s.id.clone())
        .collect();

    let unused_assets = helper_assets
        .iter()
        .filter(|asset| {
            !decisions
                .iter()
                .any(|d| d.helper_asset.as_ref().is_some_and(|h| h.source == asset.source))
        })
        .map(|asset| asset.source.clone())
        .collect();

    AssignmentResult {
        assignments: Vec::new(),
        unmatched_segments,
        unused_assets,
    }
}
