//! Sine voices and the mixer that sums them.

use std::f32::consts::TAU;
use std::time::Duration;

/// Fade applied at both ends of a tone to avoid clicks
const RAMP: Duration = Duration::from_millis(2);

/// One short sine tone
#[derive(Debug, Clone)]
pub struct Voice {
    phase: f32,
    phase_step: f32,
    gain: f32,
    elapsed: usize,
    length: usize,
    ramp: usize,
}

impl Voice {
    pub fn new(frequency_hz: f32, sample_rate_hz: u32, duration: Duration, gain: f32) -> Self {
        let rate = sample_rate_hz.max(1) as f32;
        let length = (duration.as_secs_f32() * rate).round() as usize;
        let ramp = ((RAMP.as_secs_f32() * rate) as usize).clamp(1, (length / 2).max(1));

        Self {
            phase: 0.0,
            phase_step: TAU * frequency_hz / rate,
            gain,
            elapsed: 0,
            length,
            ramp,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.length
    }

    /// Next sample, or silence once the tone has ended
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }

        let remaining = self.length - self.elapsed;
        let envelope = (self.elapsed.min(remaining) as f32 / self.ramp as f32).min(1.0);
        let sample = self.phase.sin() * self.gain * envelope;

        self.phase = (self.phase + self.phase_step) % TAU;
        self.elapsed += 1;
        sample
    }
}

/// Sums active voices; the oldest voice is dropped past `max_voices`
#[derive(Debug, Clone)]
pub struct Mixer {
    voices: Vec<Voice>,
    max_voices: usize,
}

impl Mixer {
    pub fn new(max_voices: usize) -> Self {
        Self {
            voices: Vec::new(),
            max_voices: max_voices.max(1),
        }
    }

    pub fn push(&mut self, voice: Voice) {
        if self.voices.len() >= self.max_voices {
            self.voices.remove(0);
        }
        self.voices.push(voice);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.len()
    }

    /// Fill an interleaved buffer, writing the same sample to every channel
    pub fn fill(&mut self, out: &mut [f32], channels: usize) {
        for frame in out.chunks_mut(channels.max(1)) {
            let sample: f32 = self.voices.iter_mut().map(Voice::next_sample).sum();
            // Safety limiter: hard clip to ±0.5
            frame.fill(sample.clamp(-0.5, 0.5));
        }
        self.voices.retain(|voice| !voice.is_finished());
    }
}
