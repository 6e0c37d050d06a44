/*!
 * Silence-based avatar clip generation.
 *
 * Silence ranges come from an external analysis tool. Ranges shorter than
 * the configured threshold are ignored; the speech between the remaining
 * ranges becomes one clip each, packed back to back on the output timeline.
 */

use log::{debug, warn};

use super::model::{AvatarClip, ProcessedAvatar, SilenceRange, SilenceRegion};
use crate::timing::{seconds_to_frames, Frame};

/// Configuration for clip generation
#[derive(Debug, Clone, PartialEq)]
pub struct ClipGeneratorConfig {
    pub fps: u32,

    /// Silences shorter than this are kept in the cut
    pub silence_threshold_seconds: f64,

    /// Speech spans shorter than this are dropped
    pub min_clip_duration_seconds: f64,

    /// Volume applied to every generated clip
    pub volume: f32,
}

impl Default for ClipGeneratorConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            silence_threshold_seconds: 0.5,
            min_clip_duration_seconds: 1.0,
            volume: 1.0,
        }
    }
}

/// Turns silence data into avatar clips
pub struct ClipGenerator {
    config: ClipGeneratorConfig,
}

impl ClipGenerator {
    pub fn new(config: ClipGeneratorConfig) -> Self {
        Self { config }
    }

    /// Convert raw ranges to frame regions, keep those at or above the
    /// threshold, and sort them by start
    pub fn detect_silence_regions(&self, silences: &[SilenceRange]) -> Vec<SilenceRegion> {
        let threshold = seconds_to_frames(self.config.silence_threshold_seconds, self.config.fps);
        let mut regions: Vec<SilenceRegion> = silences
            .iter()
            .filter(|range| range.end_seconds > range.start_seconds)
            .map(|range| SilenceRegion::from_range(range, self.config.fps))
            .filter(|region| region.duration_frames >= threshold)
            .collect();

        regions.sort_by_key(|r| (r.start_frame, r.end_frame));
        regions
    }

    /// Produce a single clip spanning the full source
    pub fn passthrough(&self, source: &str, duration_seconds: f64) -> ProcessedAvatar {
        let total = seconds_to_frames(duration_seconds, self.config.fps);
        ProcessedAvatar {
            source: source.to_string(),
            original_duration_frames: total,
            processed_duration_frames: total,
            silence_regions: Vec::new(),
            clips: vec![self.clip(source, 0, 0, total)],
        }
    }

    /// Cut the silences out of the source.
    ///
    /// Falls back to a passthrough clip when nothing survives the cut.
    pub fn generate(&self, source: &str, duration_seconds: f64, silences: &[SilenceRange]) -> ProcessedAvatar {
        let total = seconds_to_frames(duration_seconds, self.config.fps);
        let min_clip = seconds_to_frames(self.config.min_clip_duration_seconds, self.config.fps);
        let regions = self.detect_silence_regions(silences);

        let mut clips = Vec::new();
        let mut original_cursor: Frame = 0;
        let mut output_cursor: Frame = 0;

        let speech_ends = regions
            .iter()
            .map(|r| (r.start_frame.clamp(0, total), r.end_frame.clamp(0, total)))
            .chain(std::iter::once((total, total)));

        for (silence_start, silence_end) in speech_ends {
            let length = silence_start - original_cursor;
            if length >= min_clip && length > 0 {
                clips.push(self.clip(source, output_cursor, original_cursor, silence_start));
                output_cursor += length;
            } else if length > 0 {
                debug!(
                    "Dropping {}-frame speech span at frame {} (below minimum of {})",
                    length, original_cursor, min_clip
                );
            }
            original_cursor = original_cursor.max(silence_end);
        }

        if clips.is_empty() {
            warn!("No speech clips survived silence removal for '{}', using the full clip", source);
            let mut avatar = self.passthrough(source, duration_seconds);
            avatar.silence_regions = regions;
            return avatar;
        }

        debug!(
            "Generated {} clips from {} silence regions ({} -> {} frames)",
            clips.len(),
            regions.len(),
            total,
            output_cursor
        );

        ProcessedAvatar {
            source: source.to_string(),
            original_duration_frames: total,
            processed_duration_frames: output_cursor,
            silence_regions: regions,
            clips,
        }
    }

    fn clip(&self, source: &str, output_start: Frame, original_start: Frame, original_end: Frame) -> AvatarClip {
        AvatarClip {
            source: source.to_string(),
            start_frame: output_start,
            end_frame: output_start + (original_end - original_start),
            original_start_frame: original_start,
            original_end_frame: original_end,
            crop: None,
            volume: self.config.volume,
        }
    }
}
