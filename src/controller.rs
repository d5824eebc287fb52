//! Playback controller: owns the bar sequence and at most one running job.

use std::mem;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bars::BarSequence;
use crate::emitter::{BarRenderer, Cadence, StepEmitter, TonePlayer};
use crate::engine::{Algorithm, Job, StepStream};
use crate::params::{BarConfig, MAX_BAR_WIDTH, MIN_BAR_WIDTH};

/// Rejected user action; the message is shown to the user as-is
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ControlError {
    #[error("Sorting is already in progress!")]
    Busy,

    #[error("Already sorted!")]
    AlreadySorted,

    #[error(
        "Please enter a value between {} and {} for bar width.",
        MIN_BAR_WIDTH,
        MAX_BAR_WIDTH
    )]
    InvalidBarWidth(u32),
}

/// User-visible, non-fatal message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl From<&ControlError> for Notification {
    fn from(err: &ControlError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

/// IDLE or RUNNING with the stream that drives the run
#[derive(Debug, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running {
        job: Job,
        stream: StepStream,
    },
}

/// Result of a single [`Controller::tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing is running
    Idle,
    /// A run is in progress
    Running,
    /// The run ended during this tick; the controller is idle again
    Finished(Job),
}

pub struct Controller {
    config: BarConfig,
    bars: BarSequence,
    state: RunState,
    emitter: StepEmitter,
    rng: StdRng,
    notifications: Vec<Notification>,
}

impl Controller {
    /// Create an idle controller with freshly generated, sorted bars
    pub fn new(config: BarConfig, cadence: Cadence, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            bars: BarSequence::generate(&config),
            config,
            state: RunState::Idle,
            emitter: StepEmitter::new(cadence),
            rng,
            notifications: Vec::new(),
        }
    }

    pub fn bars(&self) -> &BarSequence {
        &self.bars
    }

    pub fn config(&self) -> &BarConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, RunState::Running { .. })
    }

    /// Job currently running, if any
    pub fn running_job(&self) -> Option<Job> {
        match &self.state {
            RunState::Running { job, .. } => Some(*job),
            RunState::Idle => None,
        }
    }

    /// Start sorting with `algorithm`
    pub fn start(&mut self, algorithm: Algorithm) -> Result<(), ControlError> {
        if self.is_running() {
            return Err(self.reject(ControlError::Busy));
        }
        if self.bars.is_sorted() {
            return Err(self.reject(ControlError::AlreadySorted));
        }
        self.launch(Job::Sort(algorithm));
        Ok(())
    }

    /// Randomize the bars; allowed on sorted input
    pub fn shuffle(&mut self) -> Result<(), ControlError> {
        if self.is_running() {
            return Err(self.reject(ControlError::Busy));
        }
        self.launch(Job::Shuffle);
        Ok(())
    }

    /// Change the bar width, regenerate the bars and shuffle them.
    ///
    /// An out-of-range width is rejected without touching any state.
    pub fn apply_bar_width(&mut self, width: u32) -> Result<(), ControlError> {
        if let Err(err) = BarConfig::validate_bar_width(width) {
            return Err(self.reject(err));
        }

        self.cancel();
        self.config.bar_width = width;
        self.bars = BarSequence::generate(&self.config);
        log::info!("bar width {} -> {} bars", width, self.bars.len());
        self.launch(Job::Shuffle);
        Ok(())
    }

    /// Adopt a new canvas size; cancels any run and regenerates sorted bars
    pub fn resize(&mut self, canvas_width: u32, canvas_height: u32) {
        self.cancel();
        self.config.canvas_width = canvas_width;
        self.config.canvas_height = canvas_height;
        self.bars = BarSequence::generate(&self.config);
        log::info!(
            "canvas {}x{} -> {} bars",
            canvas_width,
            canvas_height,
            self.bars.len()
        );
    }

    /// Stop the running job at its next step boundary.
    ///
    /// The bars keep the last emitted snapshot. Returns the cancelled job.
    pub fn cancel(&mut self) -> Option<Job> {
        match mem::take(&mut self.state) {
            RunState::Running { job, stream } => {
                drop(stream);
                log::info!("cancelled {} after {} steps", job, self.emitter.emitted());
                Some(job)
            }
            RunState::Idle => None,
        }
    }

    /// Emit every step that is due at `now`
    pub fn tick(
        &mut self,
        now: Instant,
        renderer: &mut dyn BarRenderer,
        audio: &mut dyn TonePlayer,
    ) -> TickOutcome {
        let RunState::Running { stream, .. } = &mut self.state else {
            return TickOutcome::Idle;
        };

        let mut budget = self.emitter.budget();
        let mut exhausted = false;

        while budget > 0 && self.emitter.is_due(now) {
            let Some(step) = stream.next() else {
                exhausted = true;
                break;
            };
            self.bars.replace_from(&step.snapshot);
            self.emitter
                .emit(&step, self.bars.max_value(), now, renderer, audio);
            budget -= 1;
        }

        if !exhausted {
            return TickOutcome::Running;
        }

        match mem::take(&mut self.state) {
            RunState::Running { job, .. } => {
                log::info!("{} finished after {} steps", job, self.emitter.emitted());
                TickOutcome::Finished(job)
            }
            RunState::Idle => TickOutcome::Idle,
        }
    }

    /// Take all pending notifications
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        mem::take(&mut self.notifications)
    }

    fn launch(&mut self, job: Job) {
        let rng = StdRng::seed_from_u64(self.rng.random());
        let stream = StepStream::spawn(job, self.bars.to_vec(), rng);
        self.emitter.reset();
        log::info!("starting {} over {} bars", job, self.bars.len());
        self.state = RunState::Running { job, stream };
    }

    fn reject(&mut self, err: ControlError) -> ControlError {
        log::warn!("{}", err);
        self.notifications.push(Notification::from(&err));
        err
    }
}
