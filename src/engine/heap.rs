//! In-place heap sort.

use super::{StepResult, StepSink};

/// Build a max-heap, then repeatedly move the root behind the heap
pub fn heap_sort<S: StepSink + ?Sized>(bars: &mut [u32], sink: &mut S) -> StepResult {
    let len = bars.len();
    if len < 2 {
        return Ok(());
    }

    for root in (0..len / 2).rev() {
        sift_down(bars, len, root, sink)?;
    }

    for end in (1..len).rev() {
        bars.swap(0, end);
        sink.moved(bars, end)?;
        sift_down(bars, end, 0, sink)?;
    }

    Ok(())
}

/// Restore the heap property below `root` within the first `len` bars
fn sift_down<S: StepSink + ?Sized>(
    bars: &mut [u32],
    len: usize,
    mut root: usize,
    sink: &mut S,
) -> StepResult {
    loop {
        let left = 2 * root + 1;
        let right = left + 1;
        let mut largest = root;

        if left < len && bars[left] > bars[largest] {
            largest = left;
        }
        if right < len && bars[right] > bars[largest] {
            largest = right;
        }
        if largest == root {
            return Ok(());
        }

        bars.swap(root, largest);
        sink.moved(bars, root)?;
        root = largest;
    }
}
