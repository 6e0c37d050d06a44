/*!
 * Script handling: data model and segmentation.
 *
 * - `model`: `Word`, `ScriptSegment`, `SegmentedScript`
 * - `segmenter`: sentence splitting, grouping, frame allocation, re-alignment
 */

pub mod model;
pub mod segmenter;

pub use model::{ScriptSegment, SegmentedScript, Word};
pub use segmenter::{ScriptSegmenter, SegmenterConfig};
