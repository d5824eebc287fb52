//! Rendering and recording configuration.

use std::path::PathBuf;
use std::time::Duration;

/// RGBA8 color
pub type Rgba = [u8; 4];

/// Bar colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Canvas clear color
    pub background: Rgba,

    /// Bars that are not highlighted
    pub normal: Rgba,

    /// Bar currently being moved or flashed
    pub active: Rgba,

    /// Bars confirmed by the completion sweep
    pub settled: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0, 0, 0, 255],
            normal: [255, 255, 255, 255],
            active: [255, 0, 0, 255],
            settled: [0, 128, 0, 255],
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Bar colors
    pub palette: Palette,

    /// How long a notification stays in the window title
    pub notification_duration: Duration,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            palette: Palette::default(),
            notification_duration: Duration::from_secs(5),
        }
    }
}

/// Recording mode configuration
#[derive(Debug, Clone)]
pub struct RecordingConfig {
    /// Upper bound on recorded time (seconds); bogo sort may never finish
    pub max_duration_secs: f32,

    /// Output directory for frames and audio
    pub output_dir: PathBuf,

    /// Frame rate (FPS)
    pub fps: u32,
}

impl RecordingConfig {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            max_duration_secs: 60.0,
            output_dir: output_dir.into(),
            fps: 30,
        }
    }

    /// Time between captured frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps.max(1) as f64)
    }

    /// Recording time limit; saturates for values no `Duration` can hold
    pub fn max_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.max_duration_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Frame directory path
    pub fn frames_dir(&self) -> PathBuf {
        self.output_dir.join("frames")
    }

    /// Path of a single numbered frame
    pub fn frame_path(&self, frame_num: usize) -> PathBuf {
        self.frames_dir().join(format!("frame_{:05}.png", frame_num))
    }

    /// Audio file path
    pub fn audio_path(&self) -> PathBuf {
        self.output_dir.join("audio.wav")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_paths() {
        let config = RecordingConfig::new("out");
        assert_eq!(config.frames_dir(), PathBuf::from("out/frames"));
        assert_eq!(
            config.frame_path(7),
            PathBuf::from("out/frames/frame_00007.png")
        );
        assert_eq!(config.audio_path(), PathBuf::from("out/audio.wav"));
    }

    #[test]
    fn test_max_duration_saturates() {
        let mut config = RecordingConfig::new("out");
        config.max_duration_secs = 2.5;
        assert_eq!(config.max_duration(), Duration::from_millis(2500));

        config.max_duration_secs = -1.0;
        assert_eq!(config.max_duration(), Duration::ZERO);

        config.max_duration_secs = f32::INFINITY;
        assert_eq!(config.max_duration(), Duration::MAX);

        config.max_duration_secs = 1e30;
        assert_eq!(config.max_duration(), Duration::MAX);
    }

    #[test]
    fn test_frame_interval() {
        let mut config = RecordingConfig::new("out");
        config.fps = 50;
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
