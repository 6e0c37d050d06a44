use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;

use crate::analysis::importance::{default_call_to_action_patterns, default_high_impact_patterns};
use crate::analysis::ImportanceRules;
use crate::assets::MatcherConfig;
use crate::clips::ClipGeneratorConfig;
use crate::errors::PipelineError;
use crate::file_utils::FileManager;
use crate::planner::{PlannerConfig, TransitionSettings};
use crate::script::SegmenterConfig;
use crate::timeline::{BuilderConfig, DecisionDefaults};
use crate::timing::Frame;

/// Application configuration module
/// This module handles loading, validating and saving the project settings
/// and hands each pipeline stage its own slice of them.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Output and editing settings
    #[serde(default)]
    pub project: ProjectConfig,

    /// Script segmentation settings
    #[serde(default)]
    pub segmentation: SegmentationConfig,

    /// Asset matching settings
    #[serde(default)]
    pub matching: MatchingConfig,

    /// Importance pattern sets
    #[serde(default)]
    pub importance: ImportanceConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Output format and editing behaviour
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProjectConfig {
    /// Output frame rate
    #[serde(default = "default_fps")]
    pub fps: u32,

    /// Canvas width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Silences shorter than this are kept
    #[serde(default = "default_silence_threshold_seconds")]
    pub silence_threshold_seconds: f64,

    /// Speech clips shorter than this are dropped
    #[serde(default = "default_min_clip_duration_seconds")]
    pub min_clip_duration_seconds: f64,

    /// Clips separated by at most this many frames are fused
    #[serde(default = "default_merge_tolerance_frames")]
    pub merge_tolerance_frames: Frame,

    /// Cut silences out of the avatar
    #[serde(default = "default_true")]
    pub trim_silence: bool,

    /// Chance that a transition carries a sound effect (0.0 to 1.0)
    #[serde(default = "default_transition_sfx_probability")]
    pub transition_sfx_probability: f64,

    #[serde(default = "default_transition_duration_frames")]
    pub transition_duration_frames: Frame,

    #[serde(default = "default_sfx_volume")]
    pub sfx_volume: f32,

    #[serde(default = "default_caption_style")]
    pub caption_style: String,

    #[serde(default = "default_overlay_style")]
    pub overlay_style: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            width: default_width(),
            height: default_height(),
            silence_threshold_seconds: default_silence_threshold_seconds(),
            min_clip_duration_seconds: default_min_clip_duration_seconds(),
            merge_tolerance_frames: default_merge_tolerance_frames(),
            trim_silence: true,
            transition_sfx_probability: default_transition_sfx_probability(),
            transition_duration_frames: default_transition_duration_frames(),
            sfx_volume: default_sfx_volume(),
            caption_style: default_caption_style(),
            overlay_style: default_overlay_style(),
        }
    }
}

/// Script segmentation settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SegmentationConfig {
    #[serde(default = "default_min_segment_words")]
    pub min_segment_words: usize,

    #[serde(default = "default_max_segment_words")]
    pub max_segment_words: usize,

    /// Used to estimate speech length when no avatar duration is known
    #[serde(default = "default_speaking_rate")]
    pub speaking_rate_syllables_per_second: f64,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            min_segment_words: default_min_segment_words(),
            max_segment_words: default_max_segment_words(),
            speaking_rate_syllables_per_second: default_speaking_rate(),
        }
    }
}

/// Asset matching settings
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MatchingConfig {
    /// Matches scoring below this are discarded (0.0 to 1.0)
    #[serde(default = "default_min_relevance_score")]
    pub min_relevance_score: f64,

    #[serde(default = "default_max_assets_per_segment")]
    pub max_assets_per_segment: usize,

    /// Let one asset illustrate several segments
    #[serde(default)]
    pub allow_asset_reuse: bool,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_relevance_score: default_min_relevance_score(),
            max_assets_per_segment: default_max_assets_per_segment(),
            allow_asset_reuse: false,
        }
    }
}

/// Regex sources for the importance tiers. Matching is case-insensitive.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImportanceConfig {
    #[serde(default = "default_high_impact_patterns")]
    pub high_impact_patterns: Vec<String>,

    #[serde(default = "default_call_to_action_patterns")]
    pub call_to_action_patterns: Vec<String>,
}

impl Default for ImportanceConfig {
    fn default() -> Self {
        Self {
            high_impact_patterns: default_high_impact_patterns(),
            call_to_action_patterns: default_call_to_action_patterns(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_fps() -> u32 {
    30
}

fn default_width() -> u32 {
    1080
}

fn default_height() -> u32 {
    1920 // vertical short-form video
}

fn default_silence_threshold_seconds() -> f64 {
    0.5
}

fn default_min_clip_duration_seconds() -> f64 {
    1.0
}

fn default_merge_tolerance_frames() -> Frame {
    3
}

fn default_true() -> bool {
    true
}

fn default_transition_sfx_probability() -> f64 {
    0.3
}

fn default_transition_duration_frames() -> Frame {
    10
}

fn default_sfx_volume() -> f32 {
    0.5
}

fn default_caption_style() -> String {
    "default".to_string()
}

fn default_overlay_style() -> String {
    "keyphrase".to_string()
}

fn default_min_segment_words() -> usize {
    5
}

fn default_max_segment_words() -> usize {
    25
}

fn default_speaking_rate() -> f64 {
    4.0
}

fn default_min_relevance_score() -> f64 {
    0.2
}

fn default_max_assets_per_segment() -> usize {
    1
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        let project = &self.project;
        if project.fps == 0 {
            return Err(anyhow!("Frame rate must be greater than zero"));
        }
        if project.width == 0 || project.height == 0 {
            return Err(anyhow!(
                "Canvas size must be positive, got {}x{}",
                project.width,
                project.height
            ));
        }
        if project.silence_threshold_seconds < 0.0 || project.min_clip_duration_seconds < 0.0 {
            return Err(anyhow!("Silence threshold and minimum clip duration cannot be negative"));
        }
        if project.merge_tolerance_frames < 0 || project.transition_duration_frames < 0 {
            return Err(anyhow!("Frame counts cannot be negative"));
        }
        if !(0.0..=1.0).contains(&project.transition_sfx_probability) {
            return Err(anyhow!(
                "Transition sfx probability must be between 0 and 1, got {}",
                project.transition_sfx_probability
            ));
        }
        if !(0.0..=1.0).contains(&project.sfx_volume) {
            return Err(anyhow!("Sfx volume must be between 0 and 1, got {}", project.sfx_volume));
        }

        let segmentation = &self.segmentation;
        if segmentation.max_segment_words == 0 {
            return Err(anyhow!("Maximum segment words must be greater than zero"));
        }
        if segmentation.min_segment_words > segmentation.max_segment_words {
            return Err(anyhow!(
                "Minimum segment words ({}) exceeds maximum ({})",
                segmentation.min_segment_words,
                segmentation.max_segment_words
            ));
        }
        if segmentation.speaking_rate_syllables_per_second <= 0.0 {
            return Err(anyhow!("Speaking rate must be positive"));
        }

        let matching = &self.matching;
        if !(0.0..=1.0).contains(&matching.min_relevance_score) {
            return Err(anyhow!(
                "Minimum relevance score must be between 0 and 1, got {}",
                matching.min_relevance_score
            ));
        }
        if matching.max_assets_per_segment == 0 {
            return Err(anyhow!("Maximum assets per segment must be at least 1"));
        }

        self.importance_rules()
            .context("Importance patterns failed to compile")?;

        Ok(())
    }

    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = FileManager::read_to_string(&path)?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path.as_ref()))?;
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        FileManager::write_to_file(path, &json)
    }

    pub fn importance_rules(&self) -> Result<ImportanceRules, PipelineError> {
        ImportanceRules::from_patterns(
            &self.importance.high_impact_patterns,
            &self.importance.call_to_action_patterns,
        )
    }

    pub fn segmenter_config(&self) -> SegmenterConfig {
        SegmenterConfig {
            min_segment_words: self.segmentation.min_segment_words,
            max_segment_words: self.segmentation.max_segment_words,
        }
    }

    pub fn clip_generator_config(&self) -> ClipGeneratorConfig {
        ClipGeneratorConfig {
            fps: self.project.fps,
            silence_threshold_seconds: self.project.silence_threshold_seconds,
            min_clip_duration_seconds: self.project.min_clip_duration_seconds,
            ..ClipGeneratorConfig::default()
        }
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            min_relevance_score: self.matching.min_relevance_score,
            max_assets_per_segment: self.matching.max_assets_per_segment,
            allow_asset_reuse: self.matching.allow_asset_reuse,
        }
    }

    pub fn planner_config(&self) -> PlannerConfig {
        PlannerConfig {
            transitions: TransitionSettings {
                duration_frames: self.project.transition_duration_frames,
                sfx_probability: self.project.transition_sfx_probability,
                sfx_volume: self.project.sfx_volume,
            },
            overlay_style: self.project.overlay_style.clone(),
        }
    }

    pub fn builder_config(&self) -> BuilderConfig {
        BuilderConfig {
            fps: self.project.fps,
            width: self.project.width,
            height: self.project.height,
            caption_style: self.project.caption_style.clone(),
            fallback_transition_frames: self.project.transition_duration_frames,
        }
    }

    pub fn decision_defaults(&self) -> DecisionDefaults {
        DecisionDefaults {
            transition_duration_frames: self.project.transition_duration_frames,
            sfx_volume: self.project.sfx_volume,
            overlay_style: self.project.overlay_style.clone(),
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            project: ProjectConfig::default(),
            segmentation: SegmentationConfig::default(),
            matching: MatchingConfig::default(),
            importance: ImportanceConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
