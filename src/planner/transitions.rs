/*!
 * Transition selection between consecutive layouts.
 *
 * The choice is random where several transitions fit, so the random source
 * is always passed in by the caller.
 */

use rand::Rng;

use super::model::{Layout, SfxLibrary, SfxSlot, TransitionConfig, TransitionType};
use crate::timing::Frame;

/// Settings that shape every transition
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionSettings {
    /// Duration of every transition except `cut`
    pub duration_frames: Frame,

    /// Chance that an sfx reference is attached
    pub sfx_probability: f64,

    pub sfx_volume: f32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            duration_frames: 10,
            sfx_probability: 0.3,
            sfx_volume: 0.5,
        }
    }
}

/// Pick the transition type and sfx slot for a layout change
pub fn choose_transition_type<R: Rng + ?Sized>(from: Layout, to: Layout, rng: &mut R) -> (TransitionType, SfxSlot) {
    match (from, to) {
        (Layout::A, Layout::A) => {
            let kind = if rng.random_bool(0.6) { TransitionType::Cut } else { TransitionType::Fade };
            (kind, SfxSlot::Click)
        }
        (Layout::A, Layout::B | Layout::C) => {
            let kind = if rng.random_bool(0.5) { TransitionType::SlideLeft } else { TransitionType::Zoom };
            (kind, SfxSlot::Swoosh)
        }
        (Layout::B | Layout::C, Layout::A) => {
            let kind = if rng.random_bool(0.5) { TransitionType::SlideRight } else { TransitionType::Fade };
            (kind, SfxSlot::Swoosh)
        }
        (Layout::B, Layout::C) => (TransitionType::Zoom, SfxSlot::Impact),
        (Layout::C, Layout::B) => (TransitionType::Fade, SfxSlot::Swoosh),
        _ => (TransitionType::Cut, SfxSlot::Click),
    }
}

/// Build the transition into a segment.
///
/// The first segment (`previous` is `None`) always gets no transition.
pub fn select_transition<R: Rng + ?Sized>(
    previous: Option<Layout>,
    current: Layout,
    settings: &TransitionSettings,
    sfx: &SfxLibrary,
    rng: &mut R,
) -> TransitionConfig {
    let Some(previous) = previous else {
        return TransitionConfig::none();
    };

    let (transition_type, slot) = choose_transition_type(previous, current, rng);

    let probability = settings.sfx_probability.clamp(0.0, 1.0);
    let sfx = if rng.random_bool(probability) {
        sfx.get(slot).map(str::to_string)
    } else {
        None
    };

    let duration_frames = match transition_type {
        TransitionType::Cut | TransitionType::None => 0,
        _ => settings.duration_frames,
    };

    TransitionConfig {
        transition_type,
        duration_frames,
        sfx_volume: if sfx.is_some() { settings.sfx_volume } else { 0.0 },
        sfx,
    }
}
