//! Selection sort and its double-ended variant.

use super::{StepResult, StepSink};

/// Move the smallest remaining bar to the front on every pass
pub fn selection_sort<S: StepSink + ?Sized>(bars: &mut [u32], sink: &mut S) -> StepResult {
    let len = bars.len();
    for i in 0..len {
        let mut min_index = i;
        for j in (i + 1)..len {
            if bars[j] < bars[min_index] {
                min_index = j;
            }
        }
        if min_index != i {
            bars.swap(i, min_index);
            sink.moved(bars, min_index)?;
        }
    }
    Ok(())
}

/// Select both the minimum and the maximum of `[left, right]` per pass
pub fn double_selection_sort<S: StepSink + ?Sized>(
    bars: &mut [u32],
    sink: &mut S,
) -> StepResult {
    if bars.len() < 2 {
        return Ok(());
    }

    let mut left = 0;
    let mut right = bars.len() - 1;

    while left < right {
        let mut min_index = left;
        let mut max_index = right;

        for i in left..=right {
            if bars[i] < bars[min_index] {
                min_index = i;
                sink.compared(bars, i)?;
            }
            if bars[i] > bars[max_index] {
                max_index = i;
                sink.compared(bars, i)?;
            }
        }

        bars.swap(left, min_index);

        // The maximum was sitting where the minimum just went
        if max_index == left {
            max_index = min_index;
        }

        bars.swap(right, max_index);

        sink.marked(bars, left)?;
        sink.marked(bars, right)?;

        left += 1;
        right -= 1;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Highlight, Pace, StepRecorder};

    #[test]
    fn test_selection_swaps_only_when_needed() {
        let mut bars = vec![1, 3, 2];
        let mut recorder = StepRecorder::new();
        selection_sort(&mut bars, &mut recorder).unwrap();

        assert_eq!(bars, vec![1, 2, 3]);
        let steps = recorder.into_steps();
        assert_eq!(steps.len(), 1);
        assert_eq!(steps[0].highlight, Some(Highlight::Active(2)));
        assert_eq!(steps[0].tone.map(|t| t.value), Some(3));
    }

    #[test]
    fn test_double_selection_max_at_left() {
        // Max starts where the min is swapped in
        let mut bars = vec![5, 2, 1, 3];
        let mut recorder = StepRecorder::new();
        double_selection_sort(&mut bars, &mut recorder).unwrap();

        assert_eq!(bars, vec![1, 2, 3, 5]);
    }

    #[test]
    fn test_double_selection_marks_both_ends() {
        let mut bars = vec![2, 3, 1];
        let mut recorder = StepRecorder::new();
        double_selection_sort(&mut bars, &mut recorder).unwrap();

        assert_eq!(bars, vec![1, 2, 3]);

        let structural: Vec<_> = recorder
            .steps()
            .iter()
            .filter(|s| s.pace == Pace::Structural)
            .map(|s| s.highlight)
            .collect();
        assert_eq!(
            structural,
            vec![Some(Highlight::Active(0)), Some(Highlight::Active(2))]
        );
    }
}
