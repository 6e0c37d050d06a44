/*!
 * Layout planning.
 *
 * - `model`: layouts, transitions, overlays, decisions
 * - `transitions`: layout-to-layout transition table with injected randomness
 * - `overlays`: key-phrase overlay text and visibility window
 * - `layout`: the per-segment planner and its validation
 */

pub mod model;
pub mod transitions;
pub mod overlays;
pub mod layout;

pub use model::{
    Layout, LayoutDecision, OverlayAnimation, SfxLibrary, SfxSlot, TextOverlay, TransitionConfig,
    TransitionType,
};
pub use transitions::TransitionSettings;
pub use layout::{LayoutPlanner, PlanValidation, PlannerConfig};
