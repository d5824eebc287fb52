//! Bar sequence model.

use crate::params::BarConfig;

/// Ordered, mutable sequence of positive bar heights.
///
/// Values share one domain `1..=max_value`, used both for pixel height and
/// for tone frequency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarSequence {
    values: Vec<u32>,
    max_value: u32,
}

impl BarSequence {
    /// Evenly distributed heights across the canvas, in ascending order
    pub fn generate(config: &BarConfig) -> Self {
        let count = config.bar_count();
        let max_value = config.max_value();
        let values = (0..count)
            .map(|i| {
                let height = (i as u64 + 1) * max_value as u64 / count as u64;
                (height as u32).max(1)
            })
            .collect();

        Self { values, max_value }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.values
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.values.clone()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    pub fn is_sorted(&self) -> bool {
        is_sorted(&self.values)
    }

    /// Overwrite the sequence with a step snapshot
    pub fn replace_from(&mut self, snapshot: &[u32]) {
        if snapshot.len() == self.values.len() {
            self.values.copy_from_slice(snapshot);
        } else {
            self.values = snapshot.to_vec();
        }
    }
}

/// True when every element is >= its predecessor
pub fn is_sorted(values: &[u32]) -> bool {
    values.windows(2).all(|pair| pair[1] >= pair[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_even_heights() {
        let config = BarConfig {
            canvas_width: 20,
            canvas_height: 100,
            bar_width: 5,
        };
        let bars = BarSequence::generate(&config);

        assert_eq!(bars.as_slice(), &[25, 50, 75, 100]);
        assert_eq!(bars.max_value(), 100);
        assert!(bars.is_sorted());
    }

    #[test]
    fn test_generate_keeps_values_positive() {
        // More bars than pixels of height
        let config = BarConfig {
            canvas_width: 40,
            canvas_height: 3,
            bar_width: 1,
        };
        let bars = BarSequence::generate(&config);

        assert_eq!(bars.len(), 40);
        assert!(bars.as_slice().iter().all(|&v| v >= 1 && v <= 3));
    }

    #[test]
    fn test_generate_narrow_canvas_is_empty() {
        let config = BarConfig {
            canvas_width: 4,
            canvas_height: 100,
            bar_width: 5,
        };
        assert!(BarSequence::generate(&config).is_empty());
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[7]));
        assert!(is_sorted(&[1, 2, 2, 3]));
        assert!(!is_sorted(&[2, 1]));
        assert!(!is_sorted(&[1, 3, 2, 4]));
    }

    #[test]
    fn test_replace_from() {
        let config = BarConfig {
            canvas_width: 3,
            canvas_height: 3,
            bar_width: 1,
        };
        let mut bars = BarSequence::generate(&config);
        bars.replace_from(&[3, 1, 2]);
        assert_eq!(bars.as_slice(), &[3, 1, 2]);
        assert_eq!(bars.max_value(), 3);

        bars.replace_from(&[4, 5]);
        assert_eq!(bars.as_slice(), &[4, 5]);
    }
}
