//! Instrumented sorting algorithms.
//!
//! Each algorithm is ordinary sorting code over `&mut [u32]` that reports
//! every visualized mutation to a [`StepSink`]. The sink decides what a
//! step means: [`StepRecorder`] collects them, [`StepStream`] hands them one
//! at a time to a host that paces playback. A sink returning
//! `Err(Cancelled)` unwinds the algorithm through `?`.

mod american_flag;
mod bogo;
mod heap;
mod merge;
mod quick;
mod selection;
mod shuffle;
mod stream;
mod wave;

use std::fmt;

use rand::Rng;

pub use american_flag::american_flag_sort;
pub use bogo::bogo_sort;
pub use heap::heap_sort;
pub use merge::merge_sort;
pub use quick::quick_sort;
pub use selection::{double_selection_sort, selection_sort};
pub use shuffle::shuffle;
pub use stream::{StepRecorder, StepStream};
pub use wave::wave_effect;

/// How a bar is drawn for a given step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarState {
    Normal,
    Active,
    Settled,
}

/// Highlighted bars of a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    /// A single bar being moved or compared
    Active(usize),

    /// Completion sweep: bars before `settled` are confirmed, `active` flashes
    Sweep {
        active: Option<usize>,
        settled: usize,
    },
}

impl Highlight {
    pub fn state_of(&self, index: usize) -> BarState {
        match *self {
            Highlight::Active(active) if active == index => BarState::Active,
            Highlight::Active(_) => BarState::Normal,
            Highlight::Sweep { active, .. } if active == Some(index) => BarState::Active,
            Highlight::Sweep { settled, .. } if index < settled => BarState::Settled,
            Highlight::Sweep { .. } => BarState::Normal,
        }
    }
}

/// Tone request for the audio collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub index: usize,
    pub value: u32,
}

/// Suspension that follows a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// Regular swap or placement
    Structural,
    /// Completion sweep flash (longer)
    Flash,
    /// No suspension
    Immediate,
}

/// One visualized mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub snapshot: Vec<u32>,
    pub highlight: Option<Highlight>,
    pub tone: Option<Tone>,
    pub pace: Pace,
}

/// The consumer of a run went away; the algorithm stops at the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("step stream cancelled")]
pub struct Cancelled;

pub type StepResult = Result<(), Cancelled>;

/// Receives the steps of a running algorithm
pub trait StepSink {
    fn step(
        &mut self,
        bars: &[u32],
        highlight: Option<Highlight>,
        tone: Option<Tone>,
        pace: Pace,
    ) -> StepResult;

    /// Bar at `index` changed: highlight it and sound its value
    fn moved(&mut self, bars: &[u32], index: usize) -> StepResult {
        self.step(
            bars,
            Some(Highlight::Active(index)),
            Some(Tone {
                index,
                value: bars[index],
            }),
            Pace::Structural,
        )
    }

    /// Highlight `index` without sounding it
    fn marked(&mut self, bars: &[u32], index: usize) -> StepResult {
        self.step(bars, Some(Highlight::Active(index)), None, Pace::Structural)
    }

    /// Comparison worth hearing; does not suspend
    fn compared(&mut self, bars: &[u32], index: usize) -> StepResult {
        self.step(
            bars,
            Some(Highlight::Active(index)),
            Some(Tone {
                index,
                value: bars[index],
            }),
            Pace::Immediate,
        )
    }

    /// Plain redraw with nothing highlighted
    fn frame(&mut self, bars: &[u32]) -> StepResult {
        self.step(bars, None, None, Pace::Structural)
    }
}

/// Sorting algorithm variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Selection,
    DoubleSelection,
    Quick,
    Merge,
    Heap,
    Bogo,
    AmericanFlag,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Selection,
        Algorithm::DoubleSelection,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Bogo,
        Algorithm::AmericanFlag,
    ];

    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Selection => "selection sort",
            Algorithm::DoubleSelection => "double selection sort",
            Algorithm::Quick => "quicksort",
            Algorithm::Merge => "merge sort",
            Algorithm::Heap => "heap sort",
            Algorithm::Bogo => "bogo sort",
            Algorithm::AmericanFlag => "american flag sort",
        }
    }

    /// Command-line key
    pub fn key(self) -> &'static str {
        match self {
            Algorithm::Selection => "selection",
            Algorithm::DoubleSelection => "double-selection",
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Bogo => "bogo",
            Algorithm::AmericanFlag => "american-flag",
        }
    }

    /// Parse a trigger name such as `quickSort`, `quick-sort` or `quick`
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let stem = normalized.strip_suffix("sort").unwrap_or(&normalized);

        match stem {
            "selection" => Some(Algorithm::Selection),
            "doubleselection" => Some(Algorithm::DoubleSelection),
            "quick" => Some(Algorithm::Quick),
            "merge" => Some(Algorithm::Merge),
            "heap" => Some(Algorithm::Heap),
            "bogo" => Some(Algorithm::Bogo),
            "americanflag" => Some(Algorithm::AmericanFlag),
            _ => None,
        }
    }

    /// Sort `bars` in place, reporting every visualized mutation to `sink`
    pub fn run<R, S>(self, bars: &mut [u32], rng: &mut R, sink: &mut S) -> StepResult
    where
        R: Rng + ?Sized,
        S: StepSink + ?Sized,
    {
        match self {
            Algorithm::Selection => selection_sort(bars, sink),
            Algorithm::DoubleSelection => double_selection_sort(bars, sink),
            Algorithm::Quick => quick_sort(bars, sink),
            Algorithm::Merge => merge_sort(bars, sink),
            Algorithm::Heap => heap_sort(bars, sink),
            Algorithm::Bogo => bogo_sort(bars, rng, sink),
            Algorithm::AmericanFlag => american_flag_sort(bars, sink),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A unit of work the controller can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Sort(Algorithm),
    Shuffle,
    Wave,
}

impl Job {
    /// Sorts end with a completion sweep; shuffles do not
    pub fn finishes_with_wave(self) -> bool {
        matches!(self, Job::Sort(_) | Job::Wave)
    }

    pub fn run<R, S>(self, bars: &mut [u32], rng: &mut R, sink: &mut S) -> StepResult
    where
        R: Rng + ?Sized,
        S: StepSink + ?Sized,
    {
        match self {
            Job::Sort(algorithm) => algorithm.run(bars, rng, sink)?,
            Job::Shuffle => shuffle(bars, rng, sink)?,
            Job::Wave => {}
        }
        if self.finishes_with_wave() {
            wave_effect(bars, sink)?;
        }
        Ok(())
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Job::Sort(algorithm) => write!(f, "{}", algorithm),
            Job::Shuffle => f.write_str("shuffle"),
            Job::Wave => f.write_str("wave"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::is_sorted;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Every permutation of `values` (Heap's algorithm)
    fn permutations(values: &[u32]) -> Vec<Vec<u32>> {
        fn generate(k: usize, items: &mut Vec<u32>, out: &mut Vec<Vec<u32>>) {
            if k <= 1 {
                out.push(items.clone());
                return;
            }
            generate(k - 1, items, out);
            for i in 0..k - 1 {
                if k % 2 == 0 {
                    items.swap(i, k - 1);
                } else {
                    items.swap(0, k - 1);
                }
                generate(k - 1, items, out);
            }
        }

        let mut items = values.to_vec();
        let mut out = Vec::new();
        generate(items.len(), &mut items, &mut out);
        out
    }

    fn sorted_copy(values: &[u32]) -> Vec<u32> {
        let mut expected = values.to_vec();
        expected.sort_unstable();
        expected
    }

    fn run_recorded(algorithm: Algorithm, input: &[u32], seed: u64) -> (Vec<u32>, Vec<Step>) {
        let mut bars = input.to_vec();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut recorder = StepRecorder::new();
        algorithm
            .run(&mut bars, &mut rng, &mut recorder)
            .expect("recorder never cancels");
        (bars, recorder.into_steps())
    }

    #[test]
    fn test_all_algorithms_sort_every_small_permutation() {
        // Distinct values and duplicates
        let bases: [&[u32]; 4] = [&[1, 2, 3, 4, 5], &[2, 2, 1, 3, 1], &[7, 7, 7, 7], &[9, 40, 100, 3]];

        for algorithm in Algorithm::ALL {
            for base in bases {
                for input in permutations(base) {
                    let (output, _) = run_recorded(algorithm, &input, 3);
                    assert_eq!(
                        output,
                        sorted_copy(&input),
                        "{} failed on {:?}",
                        algorithm,
                        input
                    );
                }
            }
        }
    }

    #[test]
    fn test_all_algorithms_sort_random_inputs() {
        let mut rng = StdRng::seed_from_u64(11);

        for algorithm in Algorithm::ALL {
            // Bogo sort only gets inputs it can finish quickly
            let max_len = if algorithm == Algorithm::Bogo { 5 } else { 64 };
            for len in 0..=max_len {
                let input: Vec<u32> = (0..len).map(|_| rng.random_range(1..=50)).collect();
                let (output, steps) = run_recorded(algorithm, &input, len as u64);

                assert!(is_sorted(&output), "{} left {:?} unsorted", algorithm, output);
                assert_eq!(output, sorted_copy(&input));
                if let Some(last) = steps.last() {
                    assert_eq!(last.snapshot, output, "{} last step differs", algorithm);
                }
            }
        }
    }

    #[test]
    fn test_trivial_inputs_emit_no_steps() {
        for algorithm in Algorithm::ALL {
            for input in [&[][..], &[42][..]] {
                let (output, steps) = run_recorded(algorithm, input, 0);
                assert_eq!(output, input);
                assert!(steps.is_empty(), "{} emitted steps for {:?}", algorithm, input);
            }
        }
    }

    #[test]
    fn test_every_step_snapshot_is_a_permutation() {
        let input = [5, 1, 4, 2, 8, 3, 3, 7];
        let expected = sorted_copy(&input);

        // Merge and American flag write through auxiliary buffers, so their
        // intermediate snapshots may repeat a value
        let swapping = Algorithm::ALL
            .into_iter()
            .filter(|a| !matches!(a, Algorithm::Merge | Algorithm::AmericanFlag));

        for algorithm in swapping {
            let (_, steps) = run_recorded(algorithm, &input, 5);
            for step in steps {
                assert_eq!(sorted_copy(&step.snapshot), expected, "{}", algorithm);
            }
        }
    }

    #[test]
    fn test_from_name_accepts_trigger_names() {
        assert_eq!(Algorithm::from_name("quickSort"), Some(Algorithm::Quick));
        assert_eq!(
            Algorithm::from_name("doubleSelectionSort"),
            Some(Algorithm::DoubleSelection)
        );
        assert_eq!(
            Algorithm::from_name("american-flag"),
            Some(Algorithm::AmericanFlag)
        );
        assert_eq!(Algorithm::from_name("MERGE"), Some(Algorithm::Merge));
        assert_eq!(Algorithm::from_name("bubble"), None);

        for algorithm in Algorithm::ALL {
            assert_eq!(Algorithm::from_name(algorithm.key()), Some(algorithm));
        }
    }

    #[test]
    fn test_sort_job_appends_wave() {
        let mut bars = vec![2, 1];
        let mut rng = StdRng::seed_from_u64(0);
        let mut recorder = StepRecorder::new();
        Job::Sort(Algorithm::Selection)
            .run(&mut bars, &mut rng, &mut recorder)
            .unwrap();

        let steps = recorder.into_steps();
        // One swap, then two sweep steps per bar
        assert_eq!(steps.len(), 1 + 2 * 2);
        assert_eq!(
            steps.last().unwrap().highlight,
            Some(Highlight::Sweep {
                active: None,
                settled: 2
            })
        );
    }

    #[test]
    fn test_shuffle_job_has_no_wave() {
        let mut bars = vec![1, 2, 3, 4];
        let mut rng = StdRng::seed_from_u64(1);
        let mut recorder = StepRecorder::new();
        Job::Shuffle.run(&mut bars, &mut rng, &mut recorder).unwrap();

        assert!(recorder
            .steps()
            .iter()
            .all(|step| matches!(step.highlight, Some(Highlight::Active(_)))));
    }

    #[test]
    fn test_highlight_states() {
        let active = Highlight::Active(2);
        assert_eq!(active.state_of(2), BarState::Active);
        assert_eq!(active.state_of(1), BarState::Normal);

        let sweep = Highlight::Sweep {
            active: Some(3),
            settled: 3,
        };
        assert_eq!(sweep.state_of(0), BarState::Settled);
        assert_eq!(sweep.state_of(3), BarState::Active);
        assert_eq!(sweep.state_of(4), BarState::Normal);
    }
}
