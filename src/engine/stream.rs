//! Step sinks: an in-memory recorder and a lazily driven stream.

use std::fmt;
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use rand::rngs::StdRng;

use super::{Cancelled, Highlight, Job, Pace, Step, StepResult, StepSink, Tone};

/// Collects every step into memory
#[derive(Debug, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.steps
    }
}

impl StepSink for StepRecorder {
    fn step(
        &mut self,
        bars: &[u32],
        highlight: Option<Highlight>,
        tone: Option<Tone>,
        pace: Pace,
    ) -> StepResult {
        self.steps.push(Step {
            snapshot: bars.to_vec(),
            highlight,
            tone,
            pace,
        });
        Ok(())
    }
}

/// Sends each step across a rendezvous channel
struct ChannelSink {
    tx: Sender<Step>,
}

impl StepSink for ChannelSink {
    fn step(
        &mut self,
        bars: &[u32],
        highlight: Option<Highlight>,
        tone: Option<Tone>,
        pace: Pace,
    ) -> StepResult {
        self.tx
            .send(Step {
                snapshot: bars.to_vec(),
                highlight,
                tone,
                pace,
            })
            .map_err(|_| Cancelled)
    }
}

/// Lazy, finite, non-restartable sequence of steps for one job.
///
/// The job runs on a worker thread over its own copy of the bars and hands
/// steps over a zero-capacity channel, so it never gets more than one step
/// ahead of the consumer. Dropping the stream disconnects the channel; the
/// worker's next step fails with [`Cancelled`] and the drop joins it.
pub struct StepStream {
    job: Job,
    rx: Option<Receiver<Step>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl StepStream {
    /// Start `job` over a copy of `bars`
    pub fn spawn(job: Job, mut bars: Vec<u32>, mut rng: StdRng) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(0);

        let worker = thread::spawn(move || {
            let mut sink = ChannelSink { tx };
            match job.run(&mut bars, &mut rng, &mut sink) {
                Ok(()) => log::debug!("{} worker finished", job),
                Err(Cancelled) => log::debug!("{} worker cancelled", job),
            }
        });

        Self {
            job,
            rx: Some(rx),
            worker: Some(worker),
        }
    }
}

impl Iterator for StepStream {
    type Item = Step;

    fn next(&mut self) -> Option<Step> {
        self.rx.as_ref()?.recv().ok()
    }
}

impl Drop for StepStream {
    fn drop(&mut self) {
        // Disconnect first so a blocked worker wakes up and unwinds
        self.rx.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                log::error!("{} worker panicked", self.job);
            }
        }
    }
}

impl fmt::Debug for StepStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepStream").field("job", &self.job).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::is_sorted;
    use crate::engine::Algorithm;
    use rand::SeedableRng;

    #[test]
    fn test_stream_matches_recorder() {
        let input = vec![4, 1, 3, 5, 2];
        let job = Job::Sort(Algorithm::Heap);

        let mut expected = StepRecorder::new();
        job.run(&mut input.clone(), &mut StdRng::seed_from_u64(1), &mut expected)
            .unwrap();

        let streamed: Vec<Step> = StepStream::spawn(job, input, StdRng::seed_from_u64(1)).collect();
        assert_eq!(streamed, expected.into_steps());
    }

    #[test]
    fn test_exhausted_stream_stays_exhausted() {
        let mut stream = StepStream::spawn(Job::Shuffle, vec![1, 2], StdRng::seed_from_u64(0));
        assert_eq!(stream.by_ref().count(), 2);
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }

    #[test]
    fn test_drop_cancels_unbounded_job() {
        // Reversed bogo sort of this size will not finish on its own
        let bars: Vec<u32> = (1..=64).rev().collect();
        let mut stream = StepStream::spawn(Job::Sort(Algorithm::Bogo), bars, StdRng::seed_from_u64(5));

        let first = stream.next().expect("bogo emits shuffle steps");
        assert!(!is_sorted(&first.snapshot));
        // Must return: the worker unwinds on disconnect
        drop(stream);
    }
}
