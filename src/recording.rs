//! Headless recording: PNG frames plus a WAV of the tones, on a virtual clock.

use std::fs;
use std::time::{Duration, Instant};

use crate::audio::{AudioError, ToneWriter};
use crate::controller::{ControlError, Controller, TickOutcome};
use crate::emitter::{BarRenderer, Cadence};
use crate::engine::{Algorithm, Highlight, Job};
use crate::params::{BarConfig, Pacing, Palette, RecordingConfig, ToneConfig};
use crate::rendering::{BarLayout, FrameCanvas};

/// Virtual clock resolution
const CLOCK_TICK: Duration = Duration::from_millis(1);

#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write frame: {0}")]
    Image(#[from] image::ImageError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("{0}")]
    Rejected(#[from] ControlError),
}

/// What a finished recording produced
#[derive(Debug, Clone, PartialEq)]
pub struct RecordingSummary {
    pub frames: usize,
    pub steps: u64,
    pub duration: Duration,
    /// False when the time limit cut the run short
    pub completed: bool,
}

/// Canvas that also counts the steps drawn onto it
struct CountingCanvas {
    canvas: FrameCanvas,
    steps: u64,
}

impl BarRenderer for CountingCanvas {
    fn draw(&mut self, bars: &[u32], highlight: Option<Highlight>) {
        self.steps += 1;
        self.canvas.draw(bars, highlight);
    }
}

/// Shuffle, then sort with `algorithm`, capturing frames and audio into
/// `config.output_dir`
pub fn record(
    config: &RecordingConfig,
    bars: BarConfig,
    pacing: Pacing,
    tones: ToneConfig,
    palette: Palette,
    algorithm: Algorithm,
    seed: Option<u64>,
) -> Result<RecordingSummary, RecordingError> {
    fs::create_dir_all(config.frames_dir())?;

    let mut controller = Controller::new(bars, Cadence::Paced(pacing), seed);
    let layout = BarLayout {
        canvas_width: bars.canvas_width,
        canvas_height: bars.canvas_height,
        bar_width: bars.bar_width,
    };
    let mut renderer = CountingCanvas {
        canvas: FrameCanvas::new(layout, palette, controller.bars().max_value()),
        steps: 0,
    };
    renderer.draw(controller.bars().as_slice(), None);
    renderer.steps = 0;

    let mut audio = ToneWriter::create(config.audio_path(), tones)?;

    log::info!(
        "Recording {} over {} bars to {}",
        algorithm,
        controller.bars().len(),
        config.output_dir.display()
    );

    controller.shuffle()?;

    let start = Instant::now();
    let frame_interval = config.frame_interval();
    let max_duration = config.max_duration();
    let mut elapsed = Duration::ZERO;
    let mut next_frame = Duration::ZERO;
    let mut frames = 0;
    let mut completed = false;

    loop {
        audio.advance_to(elapsed)?;
        let outcome = controller.tick(start + elapsed, &mut renderer, &mut audio);

        if elapsed >= next_frame {
            renderer.canvas.save(config.frame_path(frames))?;
            frames += 1;
            next_frame += frame_interval;
        }

        match outcome {
            TickOutcome::Finished(Job::Shuffle) => match controller.start(algorithm) {
                Ok(()) => {}
                Err(ControlError::AlreadySorted) => {
                    log::info!("Shuffle left the bars sorted, nothing to record");
                    completed = true;
                    break;
                }
                Err(err) => return Err(err.into()),
            },
            TickOutcome::Finished(_) | TickOutcome::Idle => {
                completed = true;
                break;
            }
            TickOutcome::Running => {}
        }

        if elapsed >= max_duration {
            log::warn!("Recording limit of {:?} reached", max_duration);
            controller.cancel();
            break;
        }
        elapsed += CLOCK_TICK;
    }

    // Last frame shows the final state
    renderer.canvas.save(config.frame_path(frames))?;
    frames += 1;

    audio.advance_to(elapsed)?;
    let duration = audio.finish()?;

    log::info!(
        "Recorded {} frames, {} steps, {:.2}s of audio",
        frames,
        renderer.steps,
        duration.as_secs_f32()
    );

    Ok(RecordingSummary {
        frames,
        steps: renderer.steps,
        duration,
        completed,
    })
}
