//! Live tone output through the default cpal device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};

use super::{AudioError, Mixer, Voice};
use crate::emitter::TonePlayer;
use crate::engine::Tone;
use crate::params::ToneConfig;

/// Audio system mixing step tones into the output device
pub struct AudioSystem {
    /// Voices shared with the audio callback
    mixer: Arc<Mutex<Mixer>>,

    config: ToneConfig,

    /// Device sample rate (Hz)
    sample_rate_hz: u32,

    /// Audio output stream (kept alive)
    _stream: cpal::Stream,
}

impl AudioSystem {
    /// Open the default output device and start a silent stream
    pub fn new(config: ToneConfig) -> Result<Self, AudioError> {
        config.validate()?;

        let mixer = Arc::new(Mutex::new(Mixer::new(config.max_voices)));
        let mixer_callback = Arc::clone(&mixer);

        // Setup audio output device
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;
        let stream_config = device.default_output_config()?;

        let sample_rate_hz = stream_config.sample_rate().0;
        let channels = stream_config.channels() as usize;

        log::info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz,
            channels
        );

        let stream = device.build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| match mixer_callback.lock() {
                Ok(mut mixer) => mixer.fill(data, channels),
                Err(_) => data.fill(0.0),
            },
            |err| log::error!("Audio stream error: {}", err),
            None,
        )?;

        stream.play()?;

        Ok(Self {
            mixer,
            config,
            sample_rate_hz,
            _stream: stream,
        })
    }
}

impl TonePlayer for AudioSystem {
    fn play(&mut self, tone: Tone, max_value: u32) {
        let frequency = self.config.frequency_for(tone.value, max_value);
        let voice = Voice::new(
            frequency,
            self.sample_rate_hz,
            self.config.duration,
            self.config.gain,
        );

        match self.mixer.lock() {
            Ok(mut mixer) => mixer.push(voice),
            Err(_) => log::warn!("audio mixer poisoned, dropping tone"),
        }
    }
}
