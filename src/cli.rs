//! Command-line argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::engine::Algorithm;
use crate::params::{BarConfig, Pacing, RecordingConfig, RenderConfig};

/// Longest accepted step or flash delay (milliseconds)
pub const MAX_DELAY_MS: u64 = 10_000;

/// Finite, non-negative seconds
fn parse_seconds(value: &str) -> Result<f32, String> {
    let seconds: f32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if seconds.is_finite() && seconds >= 0.0 {
        Ok(seconds)
    } else {
        Err(format!("expected a finite, non-negative number of seconds, got {}", value))
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "Sortwave")]
#[command(about = "Sorting algorithm visualizer with tones", long_about = None)]
pub struct Args {
    /// Canvas width (pixels)
    #[arg(long, value_name = "PIXELS", default_value = "1280")]
    pub width: u32,

    /// Canvas height (pixels); also the largest bar value
    #[arg(long, value_name = "PIXELS", default_value = "720")]
    pub height: u32,

    /// Bar width (pixels, 1-20)
    #[arg(long, value_name = "PIXELS", default_value = "5")]
    pub bar_width: u32,

    /// Delay after each structural step (milliseconds)
    #[arg(long, value_name = "MS", default_value = "1",
          value_parser = clap::value_parser!(u64).range(0..=MAX_DELAY_MS))]
    pub step_delay_ms: u64,

    /// Delay after each completion-wave flash (milliseconds)
    #[arg(long, value_name = "MS", default_value = "5",
          value_parser = clap::value_parser!(u64).range(0..=MAX_DELAY_MS))]
    pub flash_delay_ms: u64,

    /// Disable audio output
    #[arg(long)]
    pub mute: bool,

    /// Seed for shuffles (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Record frames and audio to this directory instead of opening a window
    #[arg(long, value_name = "DIR")]
    pub record: Option<PathBuf>,

    /// Algorithm for recording mode: selection, double-selection, quick,
    /// merge, heap, bogo, american-flag
    #[arg(long, value_name = "NAME", default_value = "quick")]
    pub algorithm: String,

    /// Recording frame rate (FPS)
    #[arg(long, value_name = "FPS", default_value = "30")]
    pub fps: u32,

    /// Recording time limit (seconds)
    #[arg(long, value_name = "SECONDS", default_value = "60", value_parser = parse_seconds)]
    pub max_seconds: f32,
}

impl Args {
    /// Parse the recording algorithm from command-line arguments
    pub fn parse_algorithm(&self) -> Algorithm {
        match Algorithm::from_name(&self.algorithm) {
            Some(algorithm) => algorithm,
            None => {
                log::warn!("Unknown algorithm '{}', using quick", self.algorithm);
                Algorithm::Quick
            }
        }
    }

    /// Canvas and bar geometry; the bar width is checked by `main`
    pub fn bar_config(&self) -> BarConfig {
        BarConfig {
            canvas_width: self.width.max(1),
            canvas_height: self.height.max(1),
            bar_width: self.bar_width,
        }
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            step_delay: Duration::from_millis(self.step_delay_ms),
            flash_delay: Duration::from_millis(self.flash_delay_ms),
            ..Default::default()
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width.max(1),
            window_height: self.height.max(1),
            ..Default::default()
        }
    }

    /// Create recording configuration if recording mode is enabled
    pub fn recording_config(&self) -> Option<RecordingConfig> {
        self.record.as_ref().map(|dir| RecordingConfig {
            max_duration_secs: self.max_seconds,
            fps: self.fps,
            ..RecordingConfig::new(dir)
        })
    }
}
