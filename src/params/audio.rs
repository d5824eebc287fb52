//! Tone synthesis configuration.

use std::time::Duration;

use crate::audio::AudioError;

/// Mapping from bar values to short sine tones
#[derive(Debug, Clone, PartialEq)]
pub struct ToneConfig {
    /// Frequency of the smallest possible value (Hz)
    pub min_frequency_hz: f32,

    /// Frequency of the largest possible value (Hz)
    pub max_frequency_hz: f32,

    /// Length of each tone
    /// 20 ms keeps tones short without audible popping
    pub duration: Duration,

    /// Linear output gain per tone (0.0-1.0)
    pub gain: f32,

    /// Sample rate for offline rendering (Hz); live output uses the device rate
    pub sample_rate_hz: u32,

    /// Maximum simultaneous tones before the oldest is dropped
    pub max_voices: usize,
}

impl Default for ToneConfig {
    fn default() -> Self {
        Self {
            min_frequency_hz: 100.0,
            max_frequency_hz: 1000.0,
            duration: Duration::from_millis(20),
            gain: 0.1,
            sample_rate_hz: 44100,
            max_voices: 32,
        }
    }
}

impl ToneConfig {
    /// Linear frequency for `value` relative to `max_value`
    pub fn frequency_for(&self, value: u32, max_value: u32) -> f32 {
        let normalized = if max_value == 0 {
            0.0
        } else {
            (value as f32 / max_value as f32).clamp(0.0, 1.0)
        };
        self.min_frequency_hz + normalized * (self.max_frequency_hz - self.min_frequency_hz)
    }

    /// Validate configuration (positive range, sane gain, etc.)
    pub fn validate(&self) -> Result<(), AudioError> {
        if self.min_frequency_hz <= 0.0 || self.max_frequency_hz < self.min_frequency_hz {
            return Err(AudioError::InvalidConfig(format!(
                "frequency range must be positive and ascending, got {}-{} Hz",
                self.min_frequency_hz, self.max_frequency_hz
            )));
        }
        if !(0.0..=1.0).contains(&self.gain) {
            return Err(AudioError::InvalidConfig(format!(
                "gain must be within 0.0-1.0, got {}",
                self.gain
            )));
        }
        if self.sample_rate_hz == 0 {
            return Err(AudioError::InvalidConfig(
                "sample rate must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_range_endpoints() {
        let config = ToneConfig::default();

        assert_eq!(config.frequency_for(0, 720), 100.0);
        assert_eq!(config.frequency_for(720, 720), 1000.0);
        assert!((config.frequency_for(360, 720) - 550.0).abs() < 0.01);
    }

    #[test]
    fn test_frequency_clamps_out_of_domain_values() {
        let config = ToneConfig::default();
        assert_eq!(config.frequency_for(2000, 720), 1000.0);
        assert_eq!(config.frequency_for(5, 0), 100.0);
    }

    #[test]
    fn test_validate() {
        assert!(ToneConfig::default().validate().is_ok());

        let inverted = ToneConfig {
            min_frequency_hz: 900.0,
            max_frequency_hz: 100.0,
            ..ToneConfig::default()
        };
        assert!(inverted.validate().is_err());

        let loud = ToneConfig {
            gain: 2.0,
            ..ToneConfig::default()
        };
        assert!(loud.validate().is_err());
    }
}
