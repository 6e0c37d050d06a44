/*!
 * Helper assets and relevance matching.
 *
 * - `model`: `HelperAsset` derived from file names
 * - `matcher`: relevance scoring and greedy global assignment
 */

pub mod model;
pub mod matcher;

pub use model::{AssetType, FitMode, HelperAsset};
pub use matcher::{AssetMatch, AssetMatcher, AssignmentResult, MatcherConfig};
