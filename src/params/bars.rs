//! Bar sequence geometry.

use crate::controller::ControlError;

/// Narrowest accepted bar (pixels)
pub const MIN_BAR_WIDTH: u32 = 1;

/// Widest accepted bar (pixels)
pub const MAX_BAR_WIDTH: u32 = 20;

/// Canvas size and bar width used to derive the bar sequence.
///
/// The canvas size is mutable: a window resize updates it and the
/// sequence is regenerated from the new dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarConfig {
    /// Canvas width (pixels)
    pub canvas_width: u32,

    /// Canvas height (pixels), also the largest bar value
    pub canvas_height: u32,

    /// Width of a single bar (pixels, 1-20)
    pub bar_width: u32,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1280,
            canvas_height: 720,
            bar_width: 5,
        }
    }
}

impl BarConfig {
    /// Number of bars that fit across the canvas
    pub fn bar_count(&self) -> usize {
        (self.canvas_width / self.bar_width.max(MIN_BAR_WIDTH)) as usize
    }

    /// Largest value a bar can take (maps to full height and top frequency)
    pub fn max_value(&self) -> u32 {
        self.canvas_height.max(1)
    }

    /// Check a user-supplied bar width against the accepted range
    pub fn validate_bar_width(width: u32) -> Result<(), ControlError> {
        if (MIN_BAR_WIDTH..=MAX_BAR_WIDTH).contains(&width) {
            Ok(())
        } else {
            Err(ControlError::InvalidBarWidth(width))
        }
    }
}
