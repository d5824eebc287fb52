//! Sortwave library - Sorting algorithm visualizer with tones

pub mod audio;
pub mod bars;
pub mod cli;
pub mod controller;
pub mod emitter;
pub mod engine;
pub mod params;
pub mod recording;
pub mod rendering;
