/*!
 * Layout planning types.
 */

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::HelperAsset;
use crate::timing::Frame;

/// Visual arrangement of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// Full-frame avatar
    A,
    /// Split screen: avatar and helper asset
    B,
    /// Full-frame helper asset
    C,
}

impl Layout {
    /// Whether the layout shows a helper asset
    pub fn needs_helper(&self) -> bool {
        matches!(self, Layout::B | Layout::C)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Layout::A => "full avatar",
            Layout::B => "split screen",
            Layout::C => "full helper",
        }
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::A => write!(f, "A"),
            Layout::B => write!(f, "B"),
            Layout::C => write!(f, "C"),
        }
    }
}

/// Transition between consecutive segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransitionType {
    None,
    Cut,
    Fade,
    SlideLeft,
    SlideRight,
    Zoom,
}

impl std::fmt::Display for TransitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TransitionType::None => "none",
            TransitionType::Cut => "cut",
            TransitionType::Fade => "fade",
            TransitionType::SlideLeft => "slide-left",
            TransitionType::SlideRight => "slide-right",
            TransitionType::Zoom => "zoom",
        };
        write!(f, "{}", name)
    }
}

/// Sound effect slot associated with a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SfxSlot {
    Click,
    Swoosh,
    Impact,
}

impl SfxSlot {
    pub fn name(&self) -> &'static str {
        match self {
            SfxSlot::Click => "click",
            SfxSlot::Swoosh => "swoosh",
            SfxSlot::Impact => "impact",
        }
    }
}

/// Sound effect references keyed by slot name (`click`, `swoosh`, `impact`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SfxLibrary(pub BTreeMap<String, String>);

impl SfxLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, slot: SfxSlot, reference: &str) -> Self {
        self.0.insert(slot.name().to_string(), reference.to_string());
        self
    }

    /// Reference for a slot, if one was supplied
    pub fn get(&self, slot: SfxSlot) -> Option<&str> {
        self.0.get(slot.name()).map(String::as_str)
    }
}

/// Transition into a segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionConfig {
    pub transition_type: TransitionType,
    pub duration_frames: Frame,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,
    pub sfx_volume: f32,
}

impl TransitionConfig {
    /// The "no transition" value used for the first segment
    pub fn none() -> Self {
        Self {
            transition_type: TransitionType::None,
            duration_frames: 0,
            sfx: None,
            sfx_volume: 0.0,
        }
    }
}

/// Entry animation of a text overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayAnimation {
    Pop,
    Scale,
}

/// On-screen key-phrase text. Frames are relative to the owning segment
/// until the timeline builder rebases them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_text: Option<String>,
    pub style: String,
    pub animation: OverlayAnimation,
    pub start_frame: Frame,
    pub end_frame: Frame,
}

/// Editorial decision for one segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutDecision {
    pub segment_id: String,
    pub layout: Layout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub helper_asset: Option<HelperAsset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_overlay: Option<TextOverlay>,
    pub transition: TransitionConfig,
    pub rationale: String,
}
