/*!
 * # autoedit - script-to-timeline editing for talking-head videos
 *
 * A Rust library that turns a short-form video script, a talking-head
 * recording and a pool of helper media into a frame-accurate edit plan.
 *
 * ## Features
 *
 * - Syllable-weighted word timing
 * - Keyword, key-phrase and importance detection
 * - Sentence-preserving script segmentation
 * - Silence trimming of the avatar recording
 * - Keyword relevance matching of helper videos and images
 * - Layout, transition and text overlay planning with a seedable random source
 * - Contiguous timeline construction, validation and statistics
 * - Externally supplied editorial decisions
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `timing`: frame conversions, syllable estimation, word timing
 * - `analysis`: keywords, key phrases, importance tiers
 * - `script`: segment model and the script segmenter
 * - `clips`: avatar clips and silence-based clip generation
 * - `assets`: helper assets and the relevance matcher
 * - `planner`: layouts, transitions and overlays
 * - `timeline`: timeline model, builder, editorial decisions, validation
 * - `pipeline`: end-to-end orchestration with progress events
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod timing;
pub mod analysis;
pub mod script;
pub mod clips;
pub mod assets;
pub mod planner;
pub mod timeline;
pub mod pipeline;
pub mod app_config;
pub mod file_utils;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::Config;
pub use pipeline::{
    AvatarInput, EditPipeline, LogObserver, NoopObserver, PipelineEvent, PipelineInput, PipelineObserver,
    PipelineOutput, PipelineStage,
};
pub use timeline::{Timeline, TimelineItem, TimelineStats, ValidationResult};
pub use errors::{AppError, PipelineError};
