//! Fisher–Yates shuffle.

use rand::Rng;

use super::{StepResult, StepSink};

/// Backward Fisher–Yates; each exchange highlights both bars in turn
pub fn shuffle<R, S>(bars: &mut [u32], rng: &mut R, sink: &mut S) -> StepResult
where
    R: Rng + ?Sized,
    S: StepSink + ?Sized,
{
    for i in (1..bars.len()).rev() {
        let j = rng.random_range(0..=i);
        bars.swap(i, j);
        sink.moved(bars, i)?;
        sink.moved(bars, j)?;
    }
    Ok(())
}
