//! Quicksort with Lomuto partitioning.

use super::{Cancelled, StepResult, StepSink};

/// Quicksort, pivot = last element of each range.
///
/// Pending ranges live on an explicit stack instead of the call stack, so
/// an already-sorted input (linear partition depth) cannot overflow it.
/// Left ranges are handled before right ones, matching the recursive order.
pub fn quick_sort<S: StepSink + ?Sized>(bars: &mut [u32], sink: &mut S) -> StepResult {
    if bars.len() < 2 {
        return Ok(());
    }

    let mut pending = vec![(0, bars.len() - 1)];
    while let Some((low, high)) = pending.pop() {
        let pivot = partition(bars, low, high, sink)?;

        if pivot + 1 < high {
            pending.push((pivot + 1, high));
        }
        if pivot > low + 1 {
            pending.push((low, pivot - 1));
        }
    }

    Ok(())
}

/// Partition `[low, high]` around `bars[high]`; returns the pivot's final index
fn partition<S: StepSink + ?Sized>(
    bars: &mut [u32],
    low: usize,
    high: usize,
    sink: &mut S,
) -> Result<usize, Cancelled> {
    let pivot = bars[high];
    let mut store = low;

    for j in low..high {
        if bars[j] < pivot {
            bars.swap(store, j);
            store += 1;
            sink.moved(bars, j)?;
        }
    }

    bars.swap(store, high);
    sink.moved(bars, high)?;

    Ok(store)
}
