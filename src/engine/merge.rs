//! Top-down merge sort.

use super::{StepResult, StepSink};

/// Stable merge sort; every placement from the auxiliary buffers is a step
pub fn merge_sort<S: StepSink + ?Sized>(bars: &mut [u32], sink: &mut S) -> StepResult {
    merge_sort_by(bars, &|a: &u32, b: &u32| a <= b, &mut |bars: &[u32], k| {
        sink.moved(bars, k)
    })
}

/// Merge sort over any `Copy` item with an explicit `<=` and placement hook.
///
/// Ties take the left run first, which keeps equal items in input order.
pub(crate) fn merge_sort_by<T, F, P>(items: &mut [T], le: &F, place: &mut P) -> StepResult
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    P: FnMut(&[T], usize) -> StepResult,
{
    if items.len() < 2 {
        return Ok(());
    }
    sort_range(items, 0, items.len() - 1, le, place)
}

fn sort_range<T, F, P>(items: &mut [T], left: usize, right: usize, le: &F, place: &mut P) -> StepResult
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    P: FnMut(&[T], usize) -> StepResult,
{
    if left >= right {
        return Ok(());
    }

    let middle = left + (right - left) / 2;
    sort_range(items, left, middle, le, place)?;
    sort_range(items, middle + 1, right, le, place)?;
    merge(items, left, middle, right, le, place)
}

fn merge<T, F, P>(
    items: &mut [T],
    left: usize,
    middle: usize,
    right: usize,
    le: &F,
    place: &mut P,
) -> StepResult
where
    T: Copy,
    F: Fn(&T, &T) -> bool,
    P: FnMut(&[T], usize) -> StepResult,
{
    let left_run = items[left..=middle].to_vec();
    let right_run = items[middle + 1..=right].to_vec();

    let (mut i, mut j, mut k) = (0, 0, left);
    while i < left_run.len() && j < right_run.len() {
        if le(&left_run[i], &right_run[j]) {
            items[k] = left_run[i];
            i += 1;
        } else {
            items[k] = right_run[j];
            j += 1;
        }
        place(items, k)?;
        k += 1;
    }

    for &item in left_run[i..].iter().chain(&right_run[j..]) {
        items[k] = item;
        place(items, k)?;
        k += 1;
    }

    Ok(())
}
