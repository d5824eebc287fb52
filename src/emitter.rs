//! Step emission: forwarding steps to the renderer and audio sinks, and
//! deciding when the next step is due.

use std::time::{Duration, Instant};

use crate::engine::{Highlight, Step, Tone};
use crate::params::Pacing;

/// Draws the whole bar sequence, coloring the highlight distinctly
pub trait BarRenderer {
    fn draw(&mut self, bars: &[u32], highlight: Option<Highlight>);
}

/// Sounds a short tone for a bar; fire-and-forget
pub trait TonePlayer {
    fn play(&mut self, tone: Tone, max_value: u32);
}

/// Audio sink that discards every tone
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl TonePlayer for Silent {
    fn play(&mut self, _tone: Tone, _max_value: u32) {}
}

/// How fast the host drains a step stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cadence {
    /// Wait the pacing delay after each step
    Paced(Pacing),
    /// Emit everything as soon as it is asked for
    Instant,
}

/// If the host falls further behind than this, pacing restarts from now
/// instead of bursting to catch up.
const MAX_LAG: Duration = Duration::from_millis(100);

/// Forwards steps to the sinks and tracks when the next one is due
#[derive(Debug)]
pub struct StepEmitter {
    cadence: Cadence,
    next_due: Option<Instant>,
    emitted: u64,
}

impl StepEmitter {
    pub fn new(cadence: Cadence) -> Self {
        Self {
            cadence,
            next_due: None,
            emitted: 0,
        }
    }

    /// Whether the pacing delay of the previous step has elapsed
    pub fn is_due(&self, now: Instant) -> bool {
        self.next_due.map_or(true, |due| due <= now)
    }

    /// Steps allowed in a single host tick
    pub fn budget(&self) -> usize {
        match self.cadence {
            Cadence::Paced(pacing) => pacing.max_steps_per_tick.max(1),
            Cadence::Instant => usize::MAX,
        }
    }

    /// Steps emitted since the last reset
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Forget pacing state before a new run
    pub fn reset(&mut self) {
        self.next_due = None;
        self.emitted = 0;
    }

    /// Draw the step, sound its tone, then schedule the next one
    pub fn emit(
        &mut self,
        step: &Step,
        max_value: u32,
        now: Instant,
        renderer: &mut dyn BarRenderer,
        audio: &mut dyn TonePlayer,
    ) {
        renderer.draw(&step.snapshot, step.highlight);
        if let Some(tone) = step.tone {
            audio.play(tone, max_value);
        }
        self.emitted += 1;

        if let Cadence::Paced(pacing) = self.cadence {
            // Schedule from the previous due time so several short steps
            // can fit in one host tick
            let base = match self.next_due {
                Some(due) if now.saturating_duration_since(due) <= MAX_LAG => due,
                _ => now,
            };
            let delay = pacing.delay_for(step.pace);
            self.next_due = Some(base.checked_add(delay).unwrap_or_else(|| {
                log::warn!("pacing delay {:?} out of range, not waiting", delay);
                base
            }));
        }

        log::trace!(
            "step {}: highlight {:?}, tone {:?}",
            self.emitted,
            step.highlight,
            step.tone
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Pace;

    #[derive(Default)]
    struct Capture {
        frames: Vec<(Vec<u32>, Option<Highlight>)>,
        tones: Vec<(Tone, u32)>,
    }

    impl BarRenderer for Capture {
        fn draw(&mut self, bars: &[u32], highlight: Option<Highlight>) {
            self.frames.push((bars.to_vec(), highlight));
        }
    }

    impl TonePlayer for Capture {
        fn play(&mut self, tone: Tone, max_value: u32) {
            self.tones.push((tone, max_value));
        }
    }

    fn step(pace: Pace, tone: Option<Tone>) -> Step {
        Step {
            snapshot: vec![2, 1],
            highlight: Some(Highlight::Active(0)),
            tone,
            pace,
        }
    }

    #[test]
    fn test_emit_forwards_to_sinks() {
        let mut emitter = StepEmitter::new(Cadence::Instant);
        let mut renderer = Capture::default();
        let mut audio = Capture::default();
        let tone = Tone { index: 0, value: 2 };

        emitter.emit(&step(Pace::Structural, Some(tone)), 10, Instant::now(), &mut renderer, &mut audio);
        emitter.emit(&step(Pace::Structural, None), 10, Instant::now(), &mut renderer, &mut audio);

        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(renderer.frames[0], (vec![2, 1], Some(Highlight::Active(0))));
        assert_eq!(audio.tones, vec![(tone, 10)]);
        assert_eq!(emitter.emitted(), 2);
    }

    #[test]
    fn test_paced_delays() {
        let pacing = Pacing {
            step_delay: Duration::from_millis(1),
            flash_delay: Duration::from_millis(5),
            max_steps_per_tick: 8,
        };
        let mut emitter = StepEmitter::new(Cadence::Paced(pacing));
        let mut sink = Capture::default();
        let mut audio = Silent;
        let start = Instant::now();

        assert!(emitter.is_due(start));
        emitter.emit(&step(Pace::Flash, None), 2, start, &mut sink, &mut audio);
        assert!(!emitter.is_due(start + Duration::from_millis(4)));
        assert!(emitter.is_due(start + Duration::from_millis(5)));

        // Schedules from the previous due time, not from `now`
        emitter.emit(&step(Pace::Structural, None), 2, start + Duration::from_millis(5), &mut sink, &mut audio);
        emitter.emit(&step(Pace::Immediate, None), 2, start + Duration::from_millis(5), &mut sink, &mut audio);
        assert!(emitter.is_due(start + Duration::from_millis(6)));
    }

    #[test]
    fn test_lagging_host_restarts_pacing() {
        let mut emitter = StepEmitter::new(Cadence::Paced(Pacing::default()));
        let mut sink = Capture::default();
        let start = Instant::now();

        emitter.emit(&step(Pace::Structural, None), 2, start, &mut sink, &mut Silent);
        let late = start + Duration::from_secs(1);
        emitter.emit(&step(Pace::Structural, None), 2, late, &mut sink, &mut Silent);

        assert!(!emitter.is_due(late));
        assert!(emitter.is_due(late + Duration::from_millis(1)));
    }

    #[test]
    fn test_oversized_delay_does_not_overflow() {
        let pacing = Pacing {
            step_delay: Duration::MAX,
            ..Default::default()
        };
        let mut emitter = StepEmitter::new(Cadence::Paced(pacing));
        let now = Instant::now();

        emitter.emit(&step(Pace::Structural, None), 2, now, &mut Capture::default(), &mut Silent);
        assert_eq!(emitter.emitted(), 1);
        assert!(emitter.is_due(now));
    }

    #[test]
    fn test_budget() {
        assert_eq!(StepEmitter::new(Cadence::Instant).budget(), usize::MAX);
        assert_eq!(
            StepEmitter::new(Cadence::Paced(Pacing::default())).budget(),
            64
        );
    }
}
