/*!
 * Script segmentation.
 *
 * Raw script text is normalized, split into sentences, and grouped greedily
 * into word-count-bounded segments. Frames are then allocated to segments in
 * proportion to their word counts and to words by syllable weight.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::model::{ScriptSegment, SegmentedScript, Word};
use crate::analysis::{extract_key_phrases, extract_keywords, is_keyword_token, ImportanceRules};
use crate::errors::PipelineError;
use crate::timing::{distribute_frames_across_words, Frame};

static HORIZONTAL_WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[ \t\u{a0}]+").expect("Invalid whitespace regex")
});

static MISSING_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([.!?])([A-Z])").expect("Invalid sentence spacing regex")
});

/// Word-count bounds for segments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// A group is only flushed once it holds at least this many words
    pub min_segment_words: usize,

    /// Groups are not grown past this many words
    pub max_segment_words: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_segment_words: 5,
            max_segment_words: 25,
        }
    }
}

/// Splits script text into timed segments
pub struct ScriptSegmenter {
    config: SegmenterConfig,
    rules: ImportanceRules,
}

impl ScriptSegmenter {
    /// Create a segmenter with the given bounds and importance rules
    pub fn new(config: SegmenterConfig, rules: ImportanceRules) -> Self {
        Self { config, rules }
    }

    /// Create a segmenter with default bounds and built-in importance patterns
    pub fn with_defaults() -> Self {
        Self::new(SegmenterConfig::default(), ImportanceRules::default())
    }

    /// Segment a script across `total_frames` frames
    pub fn segment(&self, text: &str, total_frames: Frame) -> Result<SegmentedScript, PipelineError> {
        if total_frames <= 0 {
            return Err(PipelineError::InvalidDuration {
                context: "script".to_string(),
                frames: total_frames,
            });
        }

        let normalized = normalize_text(text);
        let sentences = split_sentences(&normalized);
        let groups = self.group_sentences(&sentences);

        if groups.is_empty() {
            return Err(PipelineError::EmptyScript);
        }

        debug!(
            "Segmented script into {} sentences and {} segments",
            sentences.len(),
            groups.len()
        );

        let key_phrases = extract_key_phrases(&normalized);
        Ok(self.layout(groups, key_phrases, total_frames))
    }

    /// Recompute frame allocation against a new total without re-splitting
    /// sentences
    pub fn realign(&self, script: &SegmentedScript, total_frames: Frame) -> Result<SegmentedScript, PipelineError> {
        if total_frames <= 0 {
            return Err(PipelineError::InvalidDuration {
                context: "script".to_string(),
                frames: total_frames,
            });
        }
        if script.groups.is_empty() {
            return Err(PipelineError::EmptyScript);
        }

        debug!(
            "Re-aligning {} segments from {} to {} frames",
            script.groups.len(),
            script.total_frames,
            total_frames
        );

        Ok(self.layout(script.groups.clone(), script.key_phrases.clone(), total_frames))
    }

    /// Greedily group sentences into segments.
    ///
    /// A group is flushed when adding the next sentence would exceed the max
    /// and the group already has the min. A sentence longer than the max is
    /// never split.
    fn group_sentences(&self, sentences: &[String]) -> Vec<String> {
        let mut groups = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_words = 0;

        for sentence in sentences {
            let words = word_count(sentence);
            if words == 0 {
                continue;
            }

            if !current.is_empty()
                && current_words + words > self.config.max_segment_words
                && current_words >= self.config.min_segment_words
            {
                groups.push(current.join(" "));
                current.clear();
                current_words = 0;
            }

            current.push(sentence);
            current_words += words;
        }

        if !current.is_empty() {
            groups.push(current.join(" "));
        }

        groups
    }

    /// Allocate frames to groups and build segments
    fn layout(&self, groups: Vec<String>, key_phrases: Vec<String>, total_frames: Frame) -> SegmentedScript {
        let counts: Vec<usize> = groups.iter().map(|g| word_count(g)).collect();
        let total_words: usize = counts.iter().sum();
        let lowered_phrases: Vec<String> = key_phrases.iter().map(|p| p.to_lowercase()).collect();

        let mut segments = Vec::with_capacity(groups.len());
        let mut cumulative = 0usize;
        let mut start: Frame = 0;

        for (i, (text, count)) in groups.iter().zip(&counts).enumerate() {
            cumulative += count;
            let end = if i == groups.len() - 1 {
                total_frames
            } else {
                ((cumulative as f64 / total_words as f64) * total_frames as f64).round() as Frame
            };

            let lowered = text.to_lowercase();
            let is_key_phrase = lowered_phrases.iter().any(|p| lowered.contains(p.as_str()));

            segments.push(ScriptSegment {
                id: format!("segment-{}", i + 1),
                text: text.clone(),
                words: build_words(text, start, end - start),
                start_frame: start,
                end_frame: end,
                duration_frames: end - start,
                keywords: extract_keywords(text),
                importance: self.rules.determine_importance(text),
                is_key_phrase,
            });

            start = end;
        }

        SegmentedScript {
            segments,
            key_phrases,
            total_frames,
            groups,
        }
    }
}

fn build_words(text: &str, start_frame: Frame, duration: Frame) -> Vec<Word> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    distribute_frames_across_words(&tokens, duration)
        .into_iter()
        .zip(tokens)
        .map(|(span, token)| Word {
            text: token.to_string(),
            start_frame: start_frame + span.start,
            end_frame: start_frame + span.end,
            is_keyword: is_keyword_token(token),
        })
        .collect()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Normalize line endings and runs of whitespace, and insert a missing space
/// after sentence punctuation followed directly by a capital letter
pub fn normalize_text(text: &str) -> String {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<String> = unified
        .lines()
        .map(|line| HORIZONTAL_WHITESPACE_REGEX.replace_all(line.trim(), " ").into_owned())
        .filter(|line| !line.is_empty())
        .collect();
    let joined = lines.join("\n");
    MISSING_SPACE_REGEX.replace_all(&joined, "$1 $2").into_owned()
}

/// Split normalized text into sentences.
///
/// A boundary falls after `.`, `!` or `?` followed by whitespace and an
/// uppercase letter, or after a newline followed by non-whitespace.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\n' {
            flush_sentence(&mut current, &mut sentences);
            i += 1;
            continue;
        }

        current.push(c);

        if matches!(c, '.' | '!' | '?') {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() && chars[j] != '\n' {
                j += 1;
            }
            if j > i + 1 && j < chars.len() && chars[j].is_uppercase() {
                flush_sentence(&mut current, &mut sentences);
                i = j;
                continue;
            }
        }

        i += 1;
    }

    flush_sentence(&mut current, &mut sentences);
    sentences
}

fn flush_sentence(current: &mut String, sentences: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}
