/*!
 * Precomputed editorial decisions.
 *
 * An external editor (a person or another tool) can supply the layout of
 * each segment directly. The record is a JSON object keyed by segment id:
 *
 * ```json
 * {
 *   "segment-1": { "layout": "C", "asset": "media/widget-x-demo.mp4", "rationale": "hero shot" },
 *   "segment-2": { "layout": "A", "transition_type": "fade", "transition_duration_frames": 8 }
 * }
 * ```
 *
 * Decisions bypass matching and planning. Segments without a decision are
 * left to the timeline builder's fallback.
 */

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::assets::HelperAsset;
use crate::planner::overlays::build_text_overlay;
use crate::planner::{Layout, LayoutDecision, TransitionConfig, TransitionType};
use crate::script::ScriptSegment;
use crate::timing::Frame;

/// One externally supplied decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorialDecision {
    pub layout: Layout,

    /// Source reference of the helper asset to show
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_type: Option<TransitionType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition_duration_frames: Option<Frame>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sfx: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl EditorialDecision {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            asset: None,
            transition_type: None,
            transition_duration_frames: None,
            sfx: None,
            rationale: None,
        }
    }
}

/// Decisions keyed by segment id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditorialDecisions(pub BTreeMap<String, EditorialDecision>);

/// Settings used to fill in what a decision leaves out
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionDefaults {
    pub transition_duration_frames: Frame,
    pub sfx_volume: f32,
    pub overlay_style: String,
}

impl Default for DecisionDefaults {
    fn default() -> Self {
        Self {
            transition_duration_frames: 10,
            sfx_volume: 0.5,
            overlay_style: "keyphrase".to_string(),
        }
    }
}

impl EditorialDecisions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, segment_id: &str, decision: EditorialDecision) {
        self.0.insert(segment_id.to_string(), decision);
    }

    pub fn get(&self, segment_id: &str) -> Option<&EditorialDecision> {
        self.0.get(segment_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Convert the record into layout decisions for the given segments.
    ///
    /// Asset references are looked up among the supplied helper assets by
    /// source and parsed from the reference otherwise. Decisions for unknown
    /// segment ids are dropped with a warning.
    pub fn resolve(
        &self,
        segments: &[ScriptSegment],
        helper_assets: &[HelperAsset],
        defaults: &DecisionDefaults,
    ) -> (Vec<LayoutDecision>, Vec<String>) {
        let mut warnings = Vec::new();
        let mut decisions = Vec::with_capacity(self.0.len());

        for (index, segment) in segments.iter().enumerate() {
            let Some(decision) = self.0.get(&segment.id) else {
                continue;
            };

            let helper_asset = decision.asset.as_deref().map(|source| {
                helper_assets
                    .iter()
                    .find(|asset| asset.source == source)
                    .cloned()
                    .unwrap_or_else(|| HelperAsset::from_source(source))
            });

            let transition = resolve_transition(index, decision, defaults);

            let text_overlay = if decision.layout == Layout::A && segment.is_key_phrase {
                build_text_overlay(segment, &defaults.overlay_style)
            } else {
                None
            };

            decisions.push(LayoutDecision {
                segment_id: segment.id.clone(),
                layout: decision.layout,
                helper_asset,
                text_overlay,
                transition,
                rationale: decision
                    .rationale
                    .clone()
                    .unwrap_or_else(|| "Editorial decision".to_string()),
            });
        }

        for segment_id in self.0.keys() {
            if !segments.iter().any(|s| &s.id == segment_id) {
                let message = format!("Editorial decision for unknown segment {} ignored", segment_id);
                warn!("{}", message);
                warnings.push(message);
            }
        }

        (decisions, warnings)
    }
}

/// The first segment gets no transition unless one is given explicitly;
/// later segments default to a fade.
fn resolve_transition(index: usize, decision: &EditorialDecision, defaults: &DecisionDefaults) -> TransitionConfig {
    let transition_type = match decision.transition_type {
        Some(kind) => kind,
        None if index == 0 => return TransitionConfig::none(),
        None => TransitionType::Fade,
    };

    let duration_frames = match transition_type {
        TransitionType::None | TransitionType::Cut => 0,
        _ => decision
            .transition_duration_frames
            .unwrap_or(defaults.transition_duration_frames)
            .max(0),
    };

    TransitionConfig {
        transition_type,
        duration_frames,
        sfx_volume: if decision.sfx.is_some() { defaults.sfx_volume } else { 0.0 },
        sfx: decision.sfx.clone(),
    }
}
