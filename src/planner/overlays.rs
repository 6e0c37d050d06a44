/*!
 * Key-phrase text overlays.
 *
 * Overlay text is picked by priority:
 * 1. the first quoted phrase
 * 2. the first number followed by one or two words
 * 3. the first two or three keywords, upper-cased
 * 4. the first one or two words flagged as keywords
 *
 * The overlay is visible during the middle 60% of the segment.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{OverlayAnimation, TextOverlay};
use crate::analysis::keywords::extract_quoted_phrases;
use crate::analysis::Importance;
use crate::script::ScriptSegment;
use crate::timing::Frame;

static NUMBER_PHRASE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[$€£]?\b\d+(?:[.,]\d+)?%?(?:\s+[A-Za-z][A-Za-z'\-]*){1,2}").expect("Invalid number phrase regex")
});

const OVERLAY_START_RATIO: f64 = 0.2;
const OVERLAY_END_RATIO: f64 = 0.8;

/// Pick the overlay text for a segment, if any
pub fn extract_overlay_text(segment: &ScriptSegment) -> Option<String> {
    if let Some(quoted) = extract_quoted_phrases(&segment.text).into_iter().next() {
        return Some(quoted);
    }

    if let Some(m) = NUMBER_PHRASE_REGEX.find(&segment.text) {
        return Some(m.as_str().to_string());
    }

    if segment.keywords.len() >= 2 {
        let joined = segment.keywords.iter().take(3).cloned().collect::<Vec<_>>().join(" ");
        return Some(joined.to_uppercase());
    }

    let flagged: Vec<String> = segment
        .keyword_words()
        .take(2)
        .map(|w| w.text.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .filter(|t| !t.is_empty())
        .collect();
    if !flagged.is_empty() {
        return Some(flagged.join(" "));
    }

    None
}

/// Build the overlay for a segment, with frames relative to the segment start
pub fn build_text_overlay(segment: &ScriptSegment, style: &str) -> Option<TextOverlay> {
    let text = extract_overlay_text(segment)?;
    let duration = segment.duration_frames as f64;

    let animation = if segment.importance == Importance::High {
        OverlayAnimation::Pop
    } else {
        OverlayAnimation::Scale
    };

    Some(TextOverlay {
        text,
        secondary_text: None,
        style: style.to_string(),
        animation,
        start_frame: (duration * OVERLAY_START_RATIO).round() as Frame,
        end_frame: (duration * OVERLAY_END_RATIO).round() as Frame,
    })
}
