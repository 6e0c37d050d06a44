/*!
 * Script data model: timed words and segments.
 *
 * Frames on these types are absolute positions on the avatar timeline.
 * Segments are produced once by the segmenter and re-derived, never mutated,
 * when the available duration changes.
 */

use serde::{Deserialize, Serialize};

use crate::analysis::Importance;
use crate::timing::Frame;

/// A single spoken word with its estimated frame range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub text: String,
    pub start_frame: Frame,
    pub end_frame: Frame,
    pub is_keyword: bool,
}

/// A contiguous, timed unit of script text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSegment {
    /// Stable identifier, `segment-<n>` starting at 1
    pub id: String,

    /// Source text of the segment
    pub text: String,

    /// Words in spoken order
    pub words: Vec<Word>,

    pub start_frame: Frame,
    pub end_frame: Frame,
    pub duration_frames: Frame,

    /// Deduplicated keywords in order of first appearance
    pub keywords: Vec<String>,

    pub importance: Importance,

    /// Whether the segment contains one of the script's key phrases
    pub is_key_phrase: bool,
}

impl ScriptSegment {
    /// Number of words in the segment
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Words flagged as keywords
    pub fn keyword_words(&self) -> impl Iterator<Item = &Word> {
        self.words.iter().filter(|w| w.is_keyword)
    }
}

/// Output of the segmenter.
///
/// Keeps the grouped segment texts so the script can be re-aligned to a new
/// duration without splitting sentences again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentedScript {
    pub segments: Vec<ScriptSegment>,

    /// Key phrases extracted from the whole script
    pub key_phrases: Vec<String>,

    /// Frame count the segments were laid out against
    pub total_frames: Frame,

    /// Text of each segment, in order
    pub(crate) groups: Vec<String>,
}

impl SegmentedScript {
    /// Total number of words across all segments
    pub fn total_words(&self) -> usize {
        self.segments.iter().map(|s| s.word_count()).sum()
    }

    /// Find a segment by id
    pub fn segment(&self, id: &str) -> Option<&ScriptSegment> {
        self.segments.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}
