/*!
 * Per-segment layout planning.
 *
 * Segments are planned in order. Each decision looks at the segment's best
 * accepted asset match, its importance and key-phrase flag, and the layout
 * chosen for the previous segment.
 */

use log::{debug, info};
use rand::Rng;
use std::collections::HashMap;

use super::model::{Layout, LayoutDecision, SfxLibrary, TextOverlay};
use super::overlays::build_text_overlay;
use super::transitions::{select_transition, TransitionSettings};
use crate::analysis::Importance;
use crate::assets::{AssetMatch, AssignmentResult};
use crate::script::ScriptSegment;

/// Planner configuration
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    pub transitions: TransitionSettings,

    /// Style reference applied to text overlays
    pub overlay_style: String,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transitions: TransitionSettings::default(),
            overlay_style: "keyphrase".to_string(),
        }
    }
}

/// Issues found when checking a set of decisions
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanValidation {
    pub errors: Vec<String>,
}

impl PlanValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Chooses layouts, transitions and overlays
pub struct LayoutPlanner {
    config: PlannerConfig,
}

impl LayoutPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(PlannerConfig::default())
    }

    /// Decide the layout for a segment given its best match
    pub fn choose_layout(segment: &ScriptSegment, best_match: Option<&AssetMatch>) -> (Layout, String) {
        match best_match {
            Some(m) if segment.importance == Importance::High => (
                Layout::C,
                format!(
                    "High-importance segment with matching asset '{}' (score {:.2})",
                    m.asset.title, m.relevance_score
                ),
            ),
            Some(m) => (
                Layout::B,
                format!(
                    "{} importance segment paired with '{}' (score {:.2})",
                    capitalize_first(&segment.importance.to_string()),
                    m.asset.title,
                    m.relevance_score
                ),
            ),
            None if segment.is_key_phrase => (
                Layout::A,
                "No matching asset; key phrase shown as text overlay".to_string(),
            ),
            None => (Layout::A, "No matching asset; avatar only".to_string()),
        }
    }

    /// Plan every segment in order
    pub fn plan<R: Rng + ?Sized>(
        &self,
        segments: &[ScriptSegment],
        assignment: &AssignmentResult,
        sfx: &SfxLibrary,
        rng: &mut R,
    ) -> Vec<LayoutDecision> {
        let mut decisions = Vec::with_capacity(segments.len());
        let mut previous: Option<Layout> = None;

        for segment in segments {
            let best_match = assignment.best_match(&segment.id);
            let (layout, rationale) = Self::choose_layout(segment, best_match);

            let text_overlay: Option<TextOverlay> = if layout == Layout::A && segment.is_key_phrase {
                build_text_overlay(segment, &self.config.overlay_style)
            } else {
                None
            };

            let transition = select_transition(previous, layout, &self.config.transitions, sfx, rng);

            debug!(
                "{}: layout {} ({}), transition {}",
                segment.id, layout, rationale, transition.transition_type
            );

            decisions.push(LayoutDecision {
                segment_id: segment.id.clone(),
                layout,
                helper_asset: best_match.map(|m| m.asset.clone()),
                text_overlay,
                transition,
                rationale,
            });
            previous = Some(layout);
        }

        let mut counts: HashMap<Layout, usize> = HashMap::new();
        for d in &decisions {
            *counts.entry(d.layout).or_insert(0) += 1;
        }
        info!(
            "Planned {} segments: {} A, {} B, {} C",
            decisions.len(),
            counts.get(&Layout::A).unwrap_or(&0),
            counts.get(&Layout::B).unwrap_or(&0),
            counts.get(&Layout::C).unwrap_or(&0)
        );

        decisions
    }

    /// Check that every segment has a decision and that every `B`/`C`
    /// decision carries a helper asset
    pub fn validate(segments: &[ScriptSegment], decisions: &[LayoutDecision]) -> PlanValidation {
        let mut errors = Vec::new();

        for segment in segments {
            if !decisions.iter().any(|d| d.segment_id == segment.id) {
                errors.push(format!("Segment {} has no layout decision", segment.id));
            }
        }

        for decision in decisions {
            if decision.layout.needs_helper() && decision.helper_asset.is_none() {
                errors.push(format!(
                    "Segment {} uses layout {} without a helper asset",
                    decision.segment_id, decision.layout
                ));
            }
        }

        PlanValidation { errors }
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
