//! American flag sort (least-significant-digit radix, base 10).

use super::{StepResult, StepSink};

const RADIX: u32 = 10;

/// Distribute bars into ten buckets per decimal digit, least significant
/// first, writing each bucket back in order.
///
/// Values are `u32`, so the non-negative integer domain the digit
/// extraction relies on is guaranteed by the type.
pub fn american_flag_sort<S: StepSink + ?Sized>(bars: &mut [u32], sink: &mut S) -> StepResult {
    if bars.len() < 2 {
        return Ok(());
    }

    let max = bars.iter().copied().max().unwrap_or(0);
    let mut buckets: Vec<Vec<u32>> = vec![Vec::new(); RADIX as usize];

    for position in 0..digit_count(max) {
        for &value in bars.iter() {
            buckets[digit_at(value, position) as usize].push(value);
        }

        let mut index = 0;
        for bucket in &mut buckets {
            for value in bucket.drain(..) {
                bars[index] = value;
                sink.moved(bars, index)?;
                index += 1;
            }
        }
    }

    Ok(())
}

/// Decimal digits needed to write `value` (0 has one digit)
pub fn digit_count(value: u32) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

/// `floor(value / 10^position) mod 10`
pub fn digit_at(value: u32, position: u32) -> u32 {
    (value / RADIX.pow(position)) % RADIX
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StepRecorder;

    #[test]
    fn test_digit_helpers() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(720), 3);
        assert_eq!(digit_count(u32::MAX), 10);

        assert_eq!(digit_at(472, 0), 2);
        assert_eq!(digit_at(472, 1), 7);
        assert_eq!(digit_at(472, 2), 4);
        assert_eq!(digit_at(472, 3), 0);
    }

    #[test]
    fn test_single_digit_pass() {
        let mut bars = vec![3, 1];
        let mut recorder = StepRecorder::new();
        american_flag_sort(&mut bars, &mut recorder).unwrap();

        assert_eq!(bars, vec![1, 3]);
        let snapshots: Vec<_> = recorder.into_steps().into_iter().map(|s| s.snapshot).collect();
        // One pass: bucket 1 then bucket 3
        assert_eq!(snapshots, vec![vec![1, 1], vec![1, 3]]);
    }

    #[test]
    fn test_multi_digit_values() {
        let mut bars = vec![170, 45, 75, 90, 802, 24, 2, 66];
        let mut recorder = StepRecorder::new();
        american_flag_sort(&mut bars, &mut recorder).unwrap();

        assert_eq!(bars, vec![2, 24, 45, 66, 75, 90, 170, 802]);
        // Three digits, one placement per bar per digit
        assert_eq!(recorder.steps().len(), 3 * 8);
    }
}
