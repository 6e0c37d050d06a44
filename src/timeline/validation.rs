/*!
 * Timeline validation and summary statistics.
 *
 * The validator re-checks the whole timeline rather than trusting the
 * stages that produced it:
 * - total and per-item durations must be positive (error)
 * - every item needs an avatar source (error)
 * - `B`/`C` items should carry a helper asset (warning)
 * - items should be exactly contiguous (gap/overlap warning)
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::model::Timeline;
use crate::planner::TransitionType;
use crate::timing::Frame;

/// Problems found in a timeline
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineIssue {
    /// The timeline has no playable duration
    InvalidTotalDuration { frames: Frame },
    /// An item has zero or negative duration
    InvalidItemDuration { item_id: String, frames: Frame },
    /// An item's avatar clip has no source
    MissingAvatarSource { item_id: String },
    /// A `B` or `C` item without a helper asset
    MissingHelperAsset { item_id: String, layout: String },
    /// An item starts after the previous one ended
    Gap { item_id: String, frames: Frame },
    /// An item starts before the previous one ended
    Overlap { item_id: String, frames: Frame },
}

impl TimelineIssue {
    /// Whether the issue makes the timeline unusable
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TimelineIssue::InvalidTotalDuration { .. }
                | TimelineIssue::InvalidItemDuration { .. }
                | TimelineIssue::MissingAvatarSource { .. }
        )
    }
}

impl std::fmt::Display for TimelineIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimelineIssue::InvalidTotalDuration { frames } => {
                write!(f, "Timeline has invalid total duration: {} frames", frames)
            }
            TimelineIssue::InvalidItemDuration { item_id, frames } => {
                write!(f, "Item {} has invalid duration: {} frames", item_id, frames)
            }
            TimelineIssue::MissingAvatarSource { item_id } => {
                write!(f, "Item {} has no avatar source", item_id)
            }
            TimelineIssue::MissingHelperAsset { item_id, layout } => {
                write!(f, "Item {} uses layout {} without a helper asset", item_id, layout)
            }
            TimelineIssue::Gap { item_id, frames } => {
                write!(f, "Gap of {} frames before item {}", frames, item_id)
            }
            TimelineIssue::Overlap { item_id, frames } => {
                write!(f, "Item {} overlaps the previous item by {} frames", item_id, frames)
            }
        }
    }
}

/// Outcome of validating a timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn from_issues(issues: &[TimelineIssue]) -> Self {
        let errors: Vec<String> = issues.iter().filter(|i| i.is_error()).map(|i| i.to_string()).collect();
        let warnings: Vec<String> = issues.iter().filter(|i| !i.is_error()).map(|i| i.to_string()).collect();
        Self {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Summary numbers for a timeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineStats {
    pub total_duration_frames: Frame,
    pub total_duration_seconds: f64,
    pub item_count: usize,

    /// Item count per layout name
    pub layout_counts: BTreeMap<String, usize>,

    /// Items entered through an actual transition
    pub transition_count: usize,

    pub sfx_count: usize,
    pub caption_word_count: usize,
    pub overlay_count: usize,
}

/// Collect every issue in a timeline
pub fn find_issues(timeline: &Timeline) -> Vec<TimelineIssue> {
    let mut issues = Vec::new();

    if timeline.total_duration_frames <= 0 {
        issues.push(TimelineIssue::InvalidTotalDuration {
            frames: timeline.total_duration_frames,
        });
    }

    let mut previous_end: Option<Frame> = None;
    for item in &timeline.items {
        if item.duration_frames <= 0 {
            issues.push(TimelineIssue::InvalidItemDuration {
                item_id: item.id.clone(),
                frames: item.duration_frames,
            });
        }

        if item.avatar_slices().any(|clip| clip.source.trim().is_empty()) {
            issues.push(TimelineIssue::MissingAvatarSource { item_id: item.id.clone() });
        }

        if item.layout.needs_helper() && item.helper_asset.is_none() {
            issues.push(TimelineIssue::MissingHelperAsset {
                item_id: item.id.clone(),
                layout: item.layout.to_string(),
            });
        }

        if let Some(end) = previous_end {
            if item.start_frame > end {
                issues.push(TimelineIssue::Gap {
                    item_id: item.id.clone(),
                    frames: item.start_frame - end,
                });
            } else if item.start_frame < end {
                issues.push(TimelineIssue::Overlap {
                    item_id: item.id.clone(),
                    frames: end - item.start_frame,
                });
            }
        }
        previous_end = Some(item.end_frame);
    }

    issues
}

/// Validate a timeline
pub fn validate_timeline(timeline: &Timeline) -> ValidationResult {
    let issues = find_issues(timeline);
    let result = ValidationResult::from_issues(&issues);
    debug!(
        "Timeline validation: {} errors, {} warnings",
        result.errors.len(),
        result.warnings.len()
    );
    result
}

/// Compute summary statistics
pub fn compute_stats(timeline: &Timeline) -> TimelineStats {
    let mut layout_counts = BTreeMap::new();
    for item in &timeline.items {
        *layout_counts.entry(item.layout.to_string()).or_insert(0) += 1;
    }

    TimelineStats {
        total_duration_frames: timeline.total_duration_frames,
        total_duration_seconds: timeline.duration_seconds(),
        item_count: timeline.items.len(),
        layout_counts,
        transition_count: timeline
            .items
            .iter()
            .filter(|i| i.transition.transition_type != TransitionType::None)
            .count(),
        sfx_count: timeline.items.iter().filter(|i| i.transition.sfx.is_some()).count(),
        caption_word_count: timeline.items.iter().map(|i| i.captions.words.len()).sum(),
        overlay_count: timeline.items.iter().filter(|i| i.text_overlay.is_some()).count(),
    }
}
