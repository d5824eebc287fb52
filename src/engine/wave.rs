//! Completion sweep.

use super::{Highlight, Pace, StepResult, StepSink, Tone};

/// Flash every bar in order, then leave it in the settled color
pub fn wave_effect<S: StepSink + ?Sized>(bars: &[u32], sink: &mut S) -> StepResult {
    for index in 0..bars.len() {
        sink.step(
            bars,
            Some(Highlight::Sweep {
                active: Some(index),
                settled: index,
            }),
            Some(Tone {
                index,
                value: bars[index],
            }),
            Pace::Flash,
        )?;
        sink.step(
            bars,
            Some(Highlight::Sweep {
                active: None,
                settled: index + 1,
            }),
            None,
            Pace::Immediate,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StepRecorder;

    #[test]
    fn test_two_phase_sweep() {
        let bars = vec![1, 2, 3];
        let mut recorder = StepRecorder::new();
        wave_effect(&bars, &mut recorder).unwrap();

        let steps = recorder.into_steps();
        assert_eq!(steps.len(), 6);

        assert_eq!(steps[2].pace, Pace::Flash);
        assert_eq!(steps[2].tone, Some(Tone { index: 1, value: 2 }));
        assert_eq!(
            steps[3].highlight,
            Some(Highlight::Sweep {
                active: None,
                settled: 2
            })
        );
        assert!(steps.iter().all(|s| s.snapshot == bars));
    }

    #[test]
    fn test_empty_sweep() {
        let mut recorder = StepRecorder::new();
        wave_effect(&[], &mut recorder).unwrap();
        assert!(recorder.steps().is_empty());
    }
}
