/*!
 * Timeline construction.
 *
 * Segments, avatar clips and layout decisions are merged into one ordered
 * schedule. Items are laid out back to back from frame 0, so contiguity holds
 * by construction; the validator still re-checks it.
 */

use log::{debug, warn};
use std::collections::HashMap;

use super::model::{CaptionData, CaptionWord, Timeline, TimelineItem};
use crate::clips::{AvatarClip, ProcessedAvatar};
use crate::errors::PipelineError;
use crate::planner::{Layout, LayoutDecision, TextOverlay, TransitionConfig, TransitionType};
use crate::script::ScriptSegment;
use crate::timing::Frame;

/// Output settings for the builder
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub caption_style: String,

    /// Duration of the fade used when a segment has no decision
    pub fallback_transition_frames: Frame,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            width: 1080,
            height: 1920,
            caption_style: "default".to_string(),
            fallback_transition_frames: 10,
        }
    }
}

/// A built timeline with the warnings raised while building it
#[derive(Debug, Clone)]
pub struct TimelineBuild {
    pub timeline: Timeline,
    pub warnings: Vec<String>,
}

/// A slice of one avatar clip played by an item
struct ClipSlice<'a> {
    clip: &'a AvatarClip,
    offset: Frame,
    duration: Frame,
}

/// Builds timelines from pipeline stage outputs
pub struct TimelineBuilder {
    config: BuilderConfig,
}

impl TimelineBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Build the timeline. Segments are scheduled in the order given.
    pub fn build(
        &self,
        segments: &[ScriptSegment],
        avatar: &ProcessedAvatar,
        decisions: &[LayoutDecision],
    ) -> Result<TimelineBuild, PipelineError> {
        if segments.is_empty() {
            return Err(PipelineError::EmptyScript);
        }
        if avatar.source.trim().is_empty() {
            return Err(PipelineError::MissingAvatarSource);
        }
        if avatar.clips.is_empty() {
            return Err(PipelineError::InvalidDuration {
                context: format!("avatar '{}' (no clips)", avatar.source),
                frames: avatar.processed_duration_frames,
            });
        }

        let by_segment: HashMap<&str, &LayoutDecision> =
            decisions.iter().map(|d| (d.segment_id.as_str(), d)).collect();

        let mut warnings = Vec::new();
        let mut items = Vec::with_capacity(segments.len());
        let mut cursor: Frame = 0;

        for (index, segment) in segments.iter().enumerate() {
            let decision = match by_segment.get(segment.id.as_str()) {
                Some(decision) => (*decision).clone(),
                None => {
                    let message = format!(
                        "Segment {} has no editorial decision; defaulting to layout A with fade",
                        segment.id
                    );
                    warn!("{}", message);
                    warnings.push(message);
                    self.fallback_decision(segment)
                }
            };

            let slices = match resolve_slices(avatar, segment) {
                Some(slices) => slices,
                None => {
                    let message = format!(
                        "Segment {} (frames {}-{}) is not covered by any avatar clip; using the first clip",
                        segment.id, segment.start_frame, segment.end_frame
                    );
                    warn!("{}", message);
                    warnings.push(message);
                    let clip = &avatar.clips[0];
                    vec![ClipSlice {
                        clip,
                        offset: 0,
                        duration: segment.duration_frames.min(clip.duration_frames()),
                    }]
                }
            };

            let duration: Frame = slices.iter().map(|slice| slice.duration).sum();
            let scale = if segment.duration_frames > 0 {
                duration as f64 / segment.duration_frames as f64
            } else {
                1.0
            };

            let mut placed = Vec::with_capacity(slices.len());
            let mut slice_start = cursor;
            for slice in &slices {
                let original_start = slice.clip.original_start_frame + slice.offset;
                placed.push(AvatarClip {
                    source: slice.clip.source.clone(),
                    start_frame: slice_start,
                    end_frame: slice_start + slice.duration,
                    original_start_frame: original_start,
                    original_end_frame: original_start + slice.duration,
                    crop: slice.clip.crop,
                    volume: slice.clip.volume,
                });
                slice_start += slice.duration;
            }
            let mut placed = placed.into_iter();
            let Some(avatar_clip) = placed.next() else {
                return Err(PipelineError::InvalidDuration {
                    context: format!("segment {} (no avatar slice)", segment.id),
                    frames: duration,
                });
            };
            let continuation_clips: Vec<AvatarClip> = placed.collect();
            if !continuation_clips.is_empty() {
                debug!(
                    "Segment {} spans {} avatar clips",
                    segment.id,
                    continuation_clips.len() + 1
                );
            }

            let captions = CaptionData {
                style: self.config.caption_style.clone(),
                words: segment
                    .words
                    .iter()
                    .map(|word| CaptionWord {
                        text: word.text.clone(),
                        start_frame: rebase(word.start_frame - segment.start_frame, scale, cursor),
                        end_frame: rebase(word.end_frame - segment.start_frame, scale, cursor),
                        is_keyword: word.is_keyword,
                    })
                    .collect(),
            };

            let text_overlay = decision.text_overlay.as_ref().map(|overlay| TextOverlay {
                start_frame: rebase(overlay.start_frame, scale, cursor),
                end_frame: rebase(overlay.end_frame, scale, cursor),
                ..overlay.clone()
            });

            items.push(TimelineItem {
                id: format!("item-{}", index + 1),
                segment_id: segment.id.clone(),
                start_frame: cursor,
                end_frame: cursor + duration,
                duration_frames: duration,
                layout: decision.layout,
                avatar_clip,
                continuation_clips,
                helper_asset: decision.helper_asset,
                text_overlay,
                captions,
                transition: decision.transition,
            });

            cursor += duration;
        }

        debug!("Built timeline with {} items, {} frames", items.len(), cursor);

        Ok(TimelineBuild {
            timeline: Timeline {
                fps: self.config.fps,
                width: self.config.width,
                height: self.config.height,
                total_duration_frames: cursor,
                items,
            },
            warnings,
        })
    }

    fn fallback_decision(&self, segment: &ScriptSegment) -> LayoutDecision {
        LayoutDecision {
            segment_id: segment.id.clone(),
            layout: Layout::A,
            helper_asset: None,
            text_overlay: None,
            transition: TransitionConfig {
                transition_type: TransitionType::Fade,
                duration_frames: self.config.fallback_transition_frames,
                sfx: None,
                sfx_volume: 0.0,
            },
            rationale: "No editorial decision; default layout".to_string(),
        }
    }
}

/// Locate the avatar slices for a segment.
///
/// Segment frames are positions on the processed avatar. A single clip maps
/// directly. With several clips the segment plays every clip it overlaps, in
/// order, so speech on both sides of a trimmed cut stays in the item. `None`
/// when no clip contains the segment start.
fn resolve_slices<'a>(avatar: &'a ProcessedAvatar, segment: &ScriptSegment) -> Option<Vec<ClipSlice<'a>>> {
    if avatar.is_single_clip() {
        let clip = &avatar.clips[0];
        return Some(vec![ClipSlice {
            clip,
            offset: segment.start_frame - clip.start_frame,
            duration: segment.duration_frames,
        }]);
    }

    let first = avatar
        .clips
        .iter()
        .position(|clip| clip.contains_output_frame(segment.start_frame))?;

    let slices = avatar.clips[first..]
        .iter()
        .take_while(|clip| clip.start_frame < segment.end_frame)
        .map(|clip| {
            let start = segment.start_frame.max(clip.start_frame);
            ClipSlice {
                clip,
                offset: start - clip.start_frame,
                duration: segment.end_frame.min(clip.end_frame) - start,
            }
        })
        .filter(|slice| slice.duration > 0)
        .collect();
    Some(slices)
}

fn rebase(relative: Frame, scale: f64, cursor: Frame) -> Frame {
    cursor + (relative as f64 * scale).round() as Frame
}
