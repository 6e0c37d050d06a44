/*!
 * Timing estimation for spoken script text.
 *
 * All timing in the pipeline is expressed in frames. Word timings are not
 * measured from audio; they are estimated from syllable counts and spread
 * across the frames available to a segment.
 */

use serde::{Deserialize, Serialize};

/// Frame index or frame count. Signed so that gaps and overlaps can be
/// expressed as deltas.
pub type Frame = i64;

/// A half-open frame range `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSpan {
    pub start: Frame,
    pub end: Frame,
}

impl FrameSpan {
    pub fn new(start: Frame, end: Frame) -> Self {
        Self { start, end }
    }

    /// Number of frames covered by the span
    pub fn len(&self) -> Frame {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Shift the span by a constant offset
    pub fn offset(&self, by: Frame) -> Self {
        Self::new(self.start + by, self.end + by)
    }
}

/// Convert seconds to the nearest whole frame
pub fn seconds_to_frames(seconds: f64, fps: u32) -> Frame {
    (seconds * fps as f64).round() as Frame
}

/// Convert frames back to seconds
pub fn frames_to_seconds(frames: Frame, fps: u32) -> f64 {
    if fps == 0 {
        return 0.0;
    }
    frames as f64 / fps as f64
}

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Estimate the number of syllables in a word.
///
/// Counts vowel groups, drops a silent trailing "e" and keeps consonant + "le"
/// endings ("table", "simple") as their own syllable. Never returns less than 1.
pub fn estimate_syllables(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|c| c.is_alphabetic())
        .flat_map(|c| c.to_lowercase())
        .collect();

    if letters.len() <= 3 {
        return 1;
    }

    let mut groups = 0;
    let mut previous_vowel = false;
    for &c in &letters {
        let vowel = is_vowel(c);
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }

    let len = letters.len();
    if letters[len - 1] == 'e' {
        let consonant_le = letters[len - 2] == 'l' && !is_vowel(letters[len - 3]);
        if !consonant_le && groups > 1 {
            groups -= 1;
        }
    }

    groups.max(1)
}

/// Spread `total_frames` across words in proportion to their syllable weight.
///
/// Spans are contiguous and start at 0. Each boundary is rounded to the
/// nearest frame and the final word's end is forced to `total_frames`, so the
/// last word absorbs any rounding error and the spans always sum exactly.
pub fn distribute_frames_across_words<S: AsRef<str>>(words: &[S], total_frames: Frame) -> Vec<FrameSpan> {
    if words.is_empty() {
        return Vec::new();
    }

    let weights: Vec<usize> = words.iter().map(|w| estimate_syllables(w.as_ref())).collect();
    let total_weight: usize = weights.iter().sum();

    let mut spans = Vec::with_capacity(words.len());
    let mut cumulative = 0usize;
    let mut start: Frame = 0;

    for (i, weight) in weights.iter().enumerate() {
        cumulative += weight;
        let end = if i == words.len() - 1 {
            total_frames
        } else {
            ((cumulative as f64 / total_weight as f64) * total_frames as f64).round() as Frame
        };
        spans.push(FrameSpan::new(start, end));
        start = end;
    }

    spans
}

/// Estimate how many frames it takes to speak `text` at the given rate
pub fn estimate_speech_frames(text: &str, syllables_per_second: f64, fps: u32) -> Frame {
    if syllables_per_second <= 0.0 {
        return 0;
    }
    let syllables: usize = text.split_whitespace().map(estimate_syllables).sum();
    seconds_to_frames(syllables as f64 / syllables_per_second, fps)
}
