//! Tone synthesis for sonified steps.
//!
//! Each step's value becomes a short sine tone. Live playback mixes tones
//! into a cpal output stream; recordings render the same mixer into a WAV.

mod system;
mod voice;
mod wav;

// Re-export public types
pub use system::AudioSystem;
pub use voice::{Mixer, Voice};
pub use wav::ToneWriter;

/// Errors raised while setting up audio output
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    #[error("Invalid tone config: {0}")]
    InvalidConfig(String),

    #[error("No audio output device found")]
    NoDevice,

    #[error("Failed to get audio config: {0}")]
    StreamConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("Failed to build audio stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("Failed to start audio stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("Failed to write audio: {0}")]
    Wav(#[from] hound::Error),
}
