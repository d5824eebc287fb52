//! Bar rendering: shared layout plus GPU and software back ends.

mod canvas;
mod system;

pub use canvas::FrameCanvas;
pub use system::{RenderError, RenderSystem, Vertex};

use crate::emitter::BarRenderer;
use crate::engine::{BarState, Highlight};
use crate::params::{Palette, Rgba};

/// Pixel rectangle of one bar, origin at the top-left of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub state: BarState,
}

impl BarRect {
    pub fn color(&self, palette: &Palette) -> Rgba {
        match self.state {
            BarState::Normal => palette.normal,
            BarState::Active => palette.active,
            BarState::Settled => palette.settled,
        }
    }
}

/// Maps bar values onto canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarLayout {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub bar_width: u32,
}

impl BarLayout {
    /// Bars stand on the bottom edge; a bar of `max_value` fills the height
    pub fn rects(&self, bars: &[u32], max_value: u32, highlight: Option<Highlight>) -> Vec<BarRect> {
        let max_value = max_value.max(1) as u64;

        bars.iter()
            .enumerate()
            .map(|(index, &value)| {
                let height =
                    ((value as u64 * self.canvas_height as u64) / max_value).min(self.canvas_height as u64) as u32;
                BarRect {
                    x: index as u32 * self.bar_width,
                    y: self.canvas_height - height,
                    width: self.bar_width,
                    height,
                    state: highlight.map_or(BarState::Normal, |h| h.state_of(index)),
                }
            })
            .collect()
    }
}

/// Latest drawn state, kept until the window asks for a frame
#[derive(Debug, Clone, Default)]
pub struct FrameState {
    pub bars: Vec<u32>,
    pub highlight: Option<Highlight>,
    dirty: bool,
}

impl FrameState {
    pub fn new(bars: &[u32]) -> Self {
        Self {
            bars: bars.to_vec(),
            highlight: None,
            dirty: true,
        }
    }

    /// True once per change
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

impl BarRenderer for FrameState {
    fn draw(&mut self, bars: &[u32], highlight: Option<Highlight>) {
        self.bars.clear();
        self.bars.extend_from_slice(bars);
        self.highlight = highlight;
        self.dirty = true;
    }
}
