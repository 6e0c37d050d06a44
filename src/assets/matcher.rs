/*!
 * Asset relevance scoring and assignment.
 *
 * Every (segment, asset) pair is scored from three lexical signals:
 * - direct keyword overlap
 * - partial (substring) keyword overlap at half weight
 * - asset title words found verbatim in the segment text
 *
 * Assignment is greedy over the global score order: the highest-scoring
 * pair anywhere is taken first, so an asset goes to the segment it fits best.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::model::HelperAsset;
use crate::script::ScriptSegment;

const DIRECT_WEIGHT: f64 = 0.6;
const PARTIAL_WEIGHT: f64 = 0.25;
const TITLE_WEIGHT: f64 = 0.15;
const MIN_TITLE_WORD_LEN: usize = 4;

/// Matching constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Pairs scoring below this are discarded
    pub min_relevance_score: f64,

    /// Upper bound on assets assigned to one segment
    pub max_assets_per_segment: usize,

    /// Whether one asset may serve several segments
    pub allow_asset_reuse: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            min_relevance_score: 0.2,
            max_assets_per_segment: 1,
            allow_asset_reuse: false,
        }
    }
}

/// A scored (segment, asset) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMatch {
    pub segment_id: String,
    pub asset: HelperAsset,

    /// Composite relevance in [0, 1]
    pub relevance_score: f64,

    /// Segment keywords that matched the asset directly or partially
    pub matched_keywords: Vec<String>,
}

/// Result of greedy assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentResult {
    /// Accepted matches in acceptance order (descending score)
    pub assignments: Vec<AssetMatch>,

    /// Segments that received no asset, in segment order
    pub unmatched_segments: Vec<String>,

    /// Sources of assets that were never assigned, in input order
    pub unused_assets: Vec<String>,
}

impl AssignmentResult {
    /// Accepted matches for one segment, best first
    pub fn matches_for(&self, segment_id: &str) -> Vec<&AssetMatch> {
        self.assignments.iter().filter(|m| m.segment_id == segment_id).collect()
    }

    /// The single best accepted match for a segment
    pub fn best_match(&self, segment_id: &str) -> Option<&AssetMatch> {
        // assignments are sorted by descending score
        self.assignments.iter().find(|m| m.segment_id == segment_id)
    }

    /// Number of accepted matches per segment
    pub fn counts_by_segment(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for m in &self.assignments {
            *counts.entry(m.segment_id.clone()).or_insert(0) += 1;
        }
        counts
    }
}

/// Scores and assigns helper assets to segments
pub struct AssetMatcher {
    config: MatcherConfig,
}

impl AssetMatcher {
    pub fn new(config: MatcherConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(MatcherConfig::default())
    }

    /// Score a single pair
    pub fn score(&self, segment: &ScriptSegment, asset: &HelperAsset) -> AssetMatch {
        let denominator = segment.keywords.len().max(asset.keywords.len()).max(1) as f64;

        let mut matched_keywords = Vec::new();
        let mut direct = 0usize;
        let mut partial = 0usize;

        for keyword in &segment.keywords {
            if asset.keywords.iter().any(|k| k == keyword) {
                direct += 1;
                matched_keywords.push(keyword.clone());
            } else if asset
                .keywords
                .iter()
                .any(|k| k.contains(keyword.as_str()) || keyword.contains(k.as_str()))
            {
                partial += 1;
                matched_keywords.push(keyword.clone());
            }
        }

        let direct_score = direct as f64 / denominator;
        let partial_score = 0.5 * partial as f64 / denominator;
        let title_score = title_overlap(&segment.text, &asset.title);

        let composite = DIRECT_WEIGHT * direct_score + PARTIAL_WEIGHT * partial_score + TITLE_WEIGHT * title_score;

        AssetMatch {
            segment_id: segment.id.clone(),
            asset: asset.clone(),
            relevance_score: composite.clamp(0.0, 1.0),
            matched_keywords,
        }
    }

    /// Score every pair and keep those at or above the minimum, best first.
    ///
    /// Ties keep segment order, then asset order.
    pub fn score_all(&self, segments: &[ScriptSegment], assets: &[HelperAsset]) -> Vec<AssetMatch> {
        let mut candidates: Vec<AssetMatch> = segments
            .iter()
            .flat_map(|segment| assets.iter().map(move |asset| (segment, asset)))
            .map(|(segment, asset)| self.score(segment, asset))
            .filter(|m| m.relevance_score >= self.config.min_relevance_score)
            .collect();

        candidates.sort_by(|a, b| b.relevance_score.total_cmp(&a.relevance_score));
        candidates
    }

    /// Greedily assign assets to segments in global score order.
    ///
    /// A candidate is rejected when its segment is full, when reuse is off
    /// and the asset is already taken, or when the same pair was accepted.
    pub fn assign(&self, segments: &[ScriptSegment], assets: &[HelperAsset]) -> AssignmentResult {
        let candidates = self.score_all(segments, assets);
        debug!(
            "Scored {} segment/asset pairs, {} above {:.2}",
            segments.len() * assets.len(),
            candidates.len(),
            self.config.min_relevance_score
        );

        let mut per_segment: BTreeMap<String, usize> = BTreeMap::new();
        let mut used_assets: HashSet<String> = HashSet::new();
        let mut used_pairs: HashSet<(String, String)> = HashSet::new();
        let mut assignments = Vec::new();

        for candidate in candidates {
            let count = per_segment.get(&candidate.segment_id).copied().unwrap_or(0);
            if count >= self.config.max_assets_per_segment {
                continue;
            }
            if !self.config.allow_asset_reuse && used_assets.contains(&candidate.asset.source) {
                continue;
            }
            let pair = (candidate.segment_id.clone(), candidate.asset.source.clone());
            if used_pairs.contains(&pair) {
                continue;
            }

            debug!(
                "Assigned '{}' to {} (score {:.3}, keywords: {:?})",
                candidate.asset.title, candidate.segment_id, candidate.relevance_score, candidate.matched_keywords
            );

            used_pairs.insert(pair);
            used_assets.insert(candidate.asset.source.clone());
            *per_segment.entry(candidate.segment_id.clone()).or_insert(0) += 1;
            assignments.push(candidate);
        }

        let unmatched_segments = segments
            .iter()
            .filter(|s| !per_segment.contains_key(&s.id))
            .map(|s| s.id.clone())
            .collect();

        let unused_assets = assets
            .iter()
            .filter(|a| !used_assets.contains(&a.source))
            .map(|a| a.source.clone())
            .collect();

        AssignmentResult {
            assignments,
            unmatched_segments,
            unused_assets,
        }
    }
}

/// Fraction of title words (4+ characters) found verbatim in the text
fn title_overlap(text: &str, title: &str) -> f64 {
    let lowered = text.to_lowercase();
    let title_words: Vec<String> = title
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() >= MIN_TITLE_WORD_LEN)
        .collect();

    if title_words.is_empty() {
        return 0.0;
    }

    let found = title_words.iter().filter(|w| lowered.contains(w.as_str())).count();
    found as f64 / title_words.len() as f64
}
