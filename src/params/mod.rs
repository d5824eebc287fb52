//! Parameter definitions with physical units and documented semantics.
//!
//! All tunable numbers live here with:
//! - Units (pixels, milliseconds, Hz)
//! - Documented ranges and meanings
//! - Validation where a value comes from the user

mod audio;
mod bars;
mod pacing;
mod render;

// Re-export all types
pub use audio::ToneConfig;
pub use bars::{BarConfig, MAX_BAR_WIDTH, MIN_BAR_WIDTH};
pub use pacing::Pacing;
pub use render::{Palette, RecordingConfig, RenderConfig, Rgba};
