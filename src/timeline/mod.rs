/*!
 * Timeline construction and checking.
 *
 * - `model`: `Timeline`, `TimelineItem`, captions
 * - `builder`: merges segments, avatar clips and decisions into a timeline
 * - `decisions`: externally supplied editorial decisions
 * - `validation`: validator and summary statistics
 */

pub mod model;
pub mod builder;
pub mod decisions;
pub mod validation;

pub use model::{CaptionData, CaptionWord, Timeline, TimelineItem};
pub use builder::{BuilderConfig, TimelineBuild, TimelineBuilder};
pub use decisions::{DecisionDefaults, EditorialDecision, EditorialDecisions};
pub use validation::{compute_stats, validate_timeline, TimelineIssue, TimelineStats, ValidationResult};
