use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::file_utils::{FileManager, MediaLibrary};
use crate::pipeline::{EditPipeline, PipelineEvent, PipelineInput, PipelineOutput, PipelineStage};
use crate::script::ScriptSegmenter;
use crate::timeline::TimelineStats;
use crate::timing::{estimate_speech_frames, frames_to_seconds, Frame};

// @module: Application controller for timeline planning

/// Summary of a `plan` run
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub output_path: PathBuf,
    pub stats: TimelineStats,
    pub fingerprint: String,
    pub warning_count: usize,
    pub unmatched_segments: usize,
}

/// Speech length estimate for a script
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScriptEstimate {
    pub segment_count: usize,
    pub word_count: usize,
    pub estimated_frames: Frame,
    pub estimated_seconds: f64,
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Pipeline built from the configuration
    pipeline: EditPipeline,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let pipeline = EditPipeline::new(config.clone())
            .context("Failed to set up the edit pipeline")?;
        Ok(Self { config, pipeline })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Load a pipeline request, optionally extended with the media found in
    /// `assets_dir`
    pub fn load_request(&self, request_path: &Path, assets_dir: Option<&Path>) -> Result<PipelineInput> {
        if !FileManager::file_exists(request_path) {
            return Err(anyhow!("Request file does not exist: {:?}", request_path));
        }
        let mut request: PipelineInput = FileManager::read_json(request_path)?;

        if let Some(dir) = assets_dir {
            let media = FileManager::collect_media(dir)
                .with_context(|| format!("Failed to scan assets directory: {:?}", dir))?;
            debug!(
                "Found {} videos, {} images and {} sound effects in {:?}",
                media.helper_videos.len(),
                media.helper_images.len(),
                media.sfx.len(),
                dir
            );
            merge_media(&mut request, media);
        }

        Ok(request)
    }

    /// Plan one request and write the pipeline output as JSON.
    ///
    /// The output goes next to the request as `<name>.timeline.json` unless
    /// `output_path` is given.
    pub fn plan(
        &self,
        request_path: &Path,
        output_path: Option<&Path>,
        seed: u64,
        assets_dir: Option<&Path>,
        show_progress: bool,
    ) -> Result<PlanReport> {
        let request = self.load_request(request_path, assets_dir)?;
        info!("Planning timeline for {:?} (seed {})", request_path, seed);

        let output = self.run_with_progress(&request, seed, show_progress)?;

        let output_path = output_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_path(request_path));
        FileManager::write_json(&output_path, &output)?;

        let fingerprint = output
            .timeline
            .fingerprint()
            .context("Failed to fingerprint timeline")?;

        info!("Success: {:?}", output_path);

        Ok(PlanReport {
            output_path,
            stats: output.stats,
            fingerprint,
            warning_count: output.warnings.len(),
            unmatched_segments: output.unmatched_segments.len(),
        })
    }

    /// Run the pipeline on an in-memory request, driving a progress bar from
    /// the pipeline events
    pub fn run_with_progress(&self, request: &PipelineInput, seed: u64, show_progress: bool) -> Result<PipelineOutput> {
        let progress_bar = if show_progress {
            let bar = ProgressBar::new(PipelineStage::ALL.len() as u64);
            let template_result = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} stages {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(template_result.progress_chars("█▓▒░"));
            bar
        } else {
            ProgressBar::hidden()
        };

        let mut observer = |event: &PipelineEvent| match event {
            PipelineEvent::StageStarted(stage) => progress_bar.set_message(stage.to_string()),
            PipelineEvent::StageCompleted { .. } => progress_bar.inc(1),
            PipelineEvent::DecisionMade { segment_id, layout, rationale } => {
                debug!("{}: layout {} ({})", segment_id, layout, rationale)
            }
            PipelineEvent::Warning(message) => progress_bar.suspend(|| warn!("{}", message)),
        };

        let mut rng = StdRng::seed_from_u64(seed);
        let result = self.pipeline.run(request, &mut rng, &mut observer);

        // Matching is skipped when editorial decisions are supplied
        progress_bar.set_position(PipelineStage::ALL.len() as u64);
        progress_bar.finish_and_clear();

        Ok(result?)
    }

    /// Estimate how long a script takes to speak and how it would segment
    pub fn estimate(&self, script_path: &Path) -> Result<ScriptEstimate> {
        let script = FileManager::read_to_string(script_path)?;
        let fps = self.config.project.fps;
        let frames = estimate_speech_frames(
            &script,
            self.config.segmentation.speaking_rate_syllables_per_second,
            fps,
        );
        if frames <= 0 {
            return Err(anyhow!("Script {:?} contains no speakable words", script_path));
        }

        let segmenter = ScriptSegmenter::new(self.config.segmenter_config(), self.config.importance_rules()?);
        let segmented = segmenter.segment(&script, frames)?;

        Ok(ScriptEstimate {
            segment_count: segmented.len(),
            word_count: segmented.total_words(),
            estimated_frames: frames,
            estimated_seconds: frames_to_seconds(frames, fps),
        })
    }
}

fn default_output_path(request_path: &Path) -> PathBuf {
    request_path.with_extension("timeline.json")
}

/// Add scanned media the request does not already list. Sound effects only
/// fill empty slots.
fn merge_media(request: &mut PipelineInput, media: MediaLibrary) {
    for video in media.helper_videos {
        if !request.helper_videos.contains(&video) {
            request.helper_videos.push(video);
        }
    }
    for image in media.helper_images {
        if !request.helper_images.contains(&image) {
            request.helper_images.push(image);
        }
    }
    for (name, reference) in media.sfx {
        request.sfx.0.entry(name).or_insert(reference);
    }
}
