/*!
 * Timeline model consumed by the rendering layer.
 *
 * All frames here are absolute output frames.
 */

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::assets::HelperAsset;
use crate::clips::AvatarClip;
use crate::planner::{Layout, TextOverlay, TransitionConfig};
use crate::timing::{frames_to_seconds, Frame};

/// A caption word on the output timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionWord {
    pub text: String,
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub is_keyword: bool,
}

/// Word-level captions for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionData {
    pub style: String,
    pub words: Vec<CaptionWord>,
}

/// One scheduled segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub segment_id: String,
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub duration_frames: Frame,
    pub layout: Layout,
    pub avatar_clip: AvatarClip,
    /// Further avatar slices when the item spans a trimmed cut
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub continuation_clips: Vec<AvatarClip>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_asset: Option<HelperAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<TextOverlay>,
    pub captions: CaptionData,
    pub transition: TransitionConfig,
}

impl TimelineItem {
    /// Every avatar slice the item plays, in output order
    pub fn avatar_slices(&self) -> impl Iterator<Item = &AvatarClip> {
        std::iter::once(&self.avatar_clip).chain(self.continuation_clips.iter())
    }
}

/// The frame-accurate edit plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub total_duration_frames: Frame,
    pub items: Vec<TimelineItem>,
}

impl Timeline {
    pub fn duration_seconds(&self) -> f64 {
        frames_to_seconds(self.total_duration_frames, self.fps)
    }

    /// The item playing at an output frame
    pub fn item_at_frame(&self, frame: Frame) -> Option<&TimelineItem> {
        self.items
            .iter()
            .find(|item| frame >= item.start_frame && frame < item.end_frame)
    }

    /// SHA-256 of the canonical JSON form, hex encoded.
    ///
    /// Two timelines with the same fingerprint render identically.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_vec(self)?;
        let digest = Sha256::digest(&json);
        Ok(digest.iter().map(|b| format!("{:02x}", b)).collect())
    }
}
