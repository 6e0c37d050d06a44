/*!
 * Lexical analysis of script text.
 *
 * - `keywords`: normalization, stop words, keyword and key-phrase extraction
 * - `importance`: three-tier importance classification
 */

pub mod keywords;
pub mod importance;

pub use keywords::{extract_key_phrases, extract_keywords, is_keyword_token, is_stop_word, normalize_word};
pub use importance::{Importance, ImportanceRules};
