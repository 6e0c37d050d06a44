/*!
 * Avatar clip handling.
 *
 * - `model`: silence regions, avatar clips, processed avatar
 * - `generator`: silence-based clip generation and passthrough mode
 */

pub mod model;
pub mod generator;

pub use model::{AvatarClip, CropRect, ProcessedAvatar, SilenceRange, SilenceRegion};
pub use generator::{ClipGenerator, ClipGeneratorConfig};
