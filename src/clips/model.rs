/*!
 * Avatar clip model.
 *
 * A processed avatar is the talking-head source cut into one or more clips.
 * Clip output ranges are packed contiguously from frame 0; original ranges
 * are disjoint, ordered, and point back into the source.
 */

use serde::{Deserialize, Serialize};

use crate::timing::{seconds_to_frames, Frame};

/// A silence time range reported by an external analysis tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SilenceRange {
    pub start_seconds: f64,
    pub end_seconds: f64,
}

impl SilenceRange {
    pub fn new(start_seconds: f64, end_seconds: f64) -> Self {
        Self { start_seconds, end_seconds }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

/// A silence range converted to frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SilenceRegion {
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub duration_frames: Frame,
}

impl SilenceRegion {
    /// Convert a time range, rounding both ends to the nearest frame
    pub fn from_range(range: &SilenceRange, fps: u32) -> Self {
        let start_frame = seconds_to_frames(range.start_seconds, fps);
        let end_frame = seconds_to_frames(range.end_seconds, fps);
        Self {
            start_frame,
            end_frame,
            duration_frames: end_frame - start_frame,
        }
    }
}

/// Crop rectangle in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// A slice of the avatar source placed on the output timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvatarClip {
    /// Source reference of the avatar video
    pub source: String,

    /// Output range
    pub start_frame: Frame,
    pub end_frame: Frame,

    /// Range in the original, untrimmed source
    pub original_start_frame: Frame,
    pub original_end_frame: Frame,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropRect>,

    pub volume: f32,
}

impl AvatarClip {
    pub fn duration_frames(&self) -> Frame {
        self.end_frame - self.start_frame
    }

    pub fn original_duration_frames(&self) -> Frame {
        self.original_end_frame - self.original_start_frame
    }

    /// Whether an output frame falls inside this clip
    pub fn contains_output_frame(&self, frame: Frame) -> bool {
        frame >= self.start_frame && frame < self.end_frame
    }

    /// Whether an original frame falls inside this clip
    pub fn contains_original_frame(&self, frame: Frame) -> bool {
        frame >= self.original_start_frame && frame < self.original_end_frame
    }
}

/// The avatar after silence processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedAvatar {
    pub source: String,
    pub original_duration_frames: Frame,
    pub processed_duration_frames: Frame,
    pub silence_regions: Vec<SilenceRegion>,
    pub clips: Vec<AvatarClip>,
}

impl ProcessedAvatar {
    /// Whether the avatar plays as a single untouched clip
    pub fn is_single_clip(&self) -> bool {
        self.clips.len() == 1
    }

    /// Frames removed by trimming
    pub fn removed_frames(&self) -> Frame {
        self.original_duration_frames - self.processed_duration_frames
    }

    /// Fuse clips whose original ranges are separated by at most
    /// `tolerance_frames`, then repack output ranges from frame 0.
    ///
    /// The earlier clip's original end is extended over the gap, so the
    /// short gap plays instead of producing a micro-cut.
    pub fn merge_micro_cuts(&self, tolerance_frames: Frame) -> ProcessedAvatar {
        let mut merged: Vec<AvatarClip> = Vec::with_capacity(self.clips.len());

        for clip in &self.clips {
            if let Some(last) = merged.last_mut() {
                let gap = clip.original_start_frame - last.original_end_frame;
                if gap <= tolerance_frames {
                    last.original_end_frame = clip.original_end_frame;
                    last.end_frame = last.start_frame + last.original_duration_frames();
                    continue;
                }
            }
            merged.push(clip.clone());
        }

        let mut cursor: Frame = 0;
        for clip in &mut merged {
            let length = clip.original_duration_frames();
            clip.start_frame = cursor;
            clip.end_frame = cursor + length;
            cursor += length;
        }

        ProcessedAvatar {
            source: self.source.clone(),
            original_duration_frames: self.original_duration_frames,
            processed_duration_frames: cursor,
            silence_regions: self.silence_regions.clone(),
            clips: merged,
        }
    }
}
