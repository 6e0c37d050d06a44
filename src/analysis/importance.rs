/*!
 * Importance classification for script segments.
 *
 * Three tiers feed layout selection directly:
 * - `High`: text hits a high-impact or call-to-action pattern
 * - `Medium`: keyword density above 0.3 or at least 3 keywords
 * - `Low`: everything else
 *
 * The pattern sets are configurable; the tier thresholds are not.
 */

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::keywords::extract_keywords;
use crate::errors::PipelineError;

const MEDIUM_KEYWORD_DENSITY: f64 = 0.3;
const MEDIUM_KEYWORD_COUNT: usize = 3;

/// Importance level of a segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Importance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Importance::Low => write!(f, "low"),
            Importance::Medium => write!(f, "medium"),
            Importance::High => write!(f, "high"),
        }
    }
}

/// Built-in high-impact patterns: launches, superlatives, urgency and
/// percentage/currency/multiplier figures
pub fn default_high_impact_patterns() -> Vec<String> {
    [
        r"\b(introducing|announcing|launch(es|ed|ing)?|unveil(s|ed|ing)?|brand[- ]new|revolutionary|breakthrough|game[- ]changer)\b",
        r"\b(best|greatest|fastest|biggest|smartest|cheapest|first[- ]ever|ultimate|unbeatable|number one)\b",
        r"\b(now|today|limited|hurry|exclusive|last chance|ends soon|don'?t miss)\b",
        r"\d+(\.\d+)?\s?%",
        r"[$€£]\s?\d+",
        r"\b\d+(\.\d+)?x\b",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Built-in call-to-action patterns
pub fn default_call_to_action_patterns() -> Vec<String> {
    [
        r"\b(buy|order|shop|subscribe|sign up|register|download|click|tap|visit|join|get started|try it|check (it )?out|link in)\b",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}

/// Compiled pattern sets used to classify importance
#[derive(Debug, Clone)]
pub struct ImportanceRules {
    high_impact: Vec<Regex>,
    call_to_action: Vec<Regex>,
}

impl Default for ImportanceRules {
    fn default() -> Self {
        // The built-in patterns are constants and always compile
        Self::from_patterns(&default_high_impact_patterns(), &default_call_to_action_patterns())
            .expect("built-in importance patterns must compile")
    }
}

impl ImportanceRules {
    /// Compile pattern sets. Matching is case-insensitive.
    pub fn from_patterns(high_impact: &[String], call_to_action: &[String]) -> Result<Self, PipelineError> {
        Ok(Self {
            high_impact: compile_all(high_impact)?,
            call_to_action: compile_all(call_to_action)?,
        })
    }

    /// Whether the text matches a high-impact pattern
    pub fn is_high_impact(&self, text: &str) -> bool {
        self.high_impact.iter().any(|re| re.is_match(text))
    }

    /// Whether the text matches a call-to-action pattern
    pub fn is_call_to_action(&self, text: &str) -> bool {
        self.call_to_action.iter().any(|re| re.is_match(text))
    }

    /// Classify a text into one of the three importance tiers
    pub fn determine_importance(&self, text: &str) -> Importance {
        if self.is_high_impact(text) || self.is_call_to_action(text) {
            return Importance::High;
        }

        let word_count = text.split_whitespace().count();
        if word_count == 0 {
            return Importance::Low;
        }

        let keyword_count = extract_keywords(text).len();
        let density = keyword_count as f64 / word_count as f64;

        if density > MEDIUM_KEYWORD_DENSITY || keyword_count >= MEDIUM_KEYWORD_COUNT {
            Importance::Medium
        } else {
            Importance::Low
        }
    }
}

fn compile_all(patterns: &[String]) -> Result<Vec<Regex>, PipelineError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .map_err(PipelineError::from)
        })
        .collect()
}
