//! Offline tone rendering into a WAV file.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Duration;

use super::{AudioError, Mixer, Voice};
use crate::emitter::TonePlayer;
use crate::engine::Tone;
use crate::params::ToneConfig;

/// Renders tones onto a timeline and writes them as mono 32-bit float WAV.
///
/// Tones start at the current timeline position; [`ToneWriter::advance_to`]
/// moves the position forward, rendering whatever is still sounding.
pub struct ToneWriter {
    writer: hound::WavWriter<BufWriter<File>>,
    mixer: Mixer,
    config: ToneConfig,
    samples_written: u64,
    buffer: Vec<f32>,
}

impl ToneWriter {
    pub fn create(path: impl AsRef<Path>, config: ToneConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: config.sample_rate_hz,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let writer = hound::WavWriter::create(path, spec)?;

        Ok(Self {
            writer,
            mixer: Mixer::new(config.max_voices),
            config,
            samples_written: 0,
            buffer: Vec::new(),
        })
    }

    /// Timeline position
    pub fn position(&self) -> Duration {
        Duration::from_secs_f64(self.samples_written as f64 / self.config.sample_rate_hz as f64)
    }

    /// Render audio up to `position` from the start of the recording
    pub fn advance_to(&mut self, position: Duration) -> Result<(), AudioError> {
        let target = (position.as_secs_f64() * self.config.sample_rate_hz as f64).round() as u64;
        if target <= self.samples_written {
            return Ok(());
        }

        self.buffer.clear();
        self.buffer
            .resize((target - self.samples_written) as usize, 0.0);
        self.mixer.fill(&mut self.buffer, 1);

        for &sample in &self.buffer {
            self.writer.write_sample(sample)?;
        }
        self.samples_written = target;
        Ok(())
    }

    /// Let the last tones ring out, then finalize the WAV header
    pub fn finish(mut self) -> Result<Duration, AudioError> {
        let tail = self.position() + self.config.duration;
        self.advance_to(tail)?;
        let length = self.position();
        self.writer.finalize()?;
        Ok(length)
    }
}

impl TonePlayer for ToneWriter {
    fn play(&mut self, tone: Tone, max_value: u32) {
        let frequency = self.config.frequency_for(tone.value, max_value);
        self.mixer.push(Voice::new(
            frequency,
            self.config.sample_rate_hz,
            self.config.duration,
            self.config.gain,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_timeline() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tones.wav");
        let config = ToneConfig {
            sample_rate_hz: 8000,
            ..ToneConfig::default()
        };

        let mut writer = ToneWriter::create(&path, config).unwrap();
        writer.play(Tone { index: 0, value: 10 }, 10);
        writer.advance_to(Duration::from_millis(100)).unwrap();
        writer.play(Tone { index: 1, value: 5 }, 10);
        let length = writer.finish().unwrap();

        assert!((length.as_secs_f64() - 0.12).abs() < 1e-6);

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().sample_rate, 8000);
        let samples: Vec<f32> = reader.into_samples::<f32>().map(Result::unwrap).collect();
        assert_eq!(samples.len(), 960);
        // First tone has ended well before the second starts
        assert!(samples[400..800].iter().all(|&s| s == 0.0));
        assert!(samples[800..].iter().any(|&s| s != 0.0));
    }
}
