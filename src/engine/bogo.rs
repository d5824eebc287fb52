//! Bogo sort.

use rand::Rng;

use super::{shuffle, StepResult, StepSink};
use crate::bars::is_sorted;

/// Shuffle until sorted; the order is checked after every shuffle.
///
/// Expected work grows factorially and the loop has no upper bound, so the
/// host must be able to cancel it.
pub fn bogo_sort<R, S>(bars: &mut [u32], rng: &mut R, sink: &mut S) -> StepResult
where
    R: Rng + ?Sized,
    S: StepSink + ?Sized,
{
    while !is_sorted(bars) {
        shuffle(bars, rng, sink)?;
        sink.frame(bars)?;
    }
    Ok(())
}
