//! Lazy augmentation of a batch stream.
//!
//! [`AugmentedBatches`] pulls one batch from the source per `next()` call,
//! augments it, and yields the result. Nothing is buffered and nothing is
//! computed ahead of the consumer, so wrapping an unbounded source is fine
//! and dropping the iterator mid-stream leaks nothing.

use crate::augment::Augment;
use crate::batch::Batch;
use crate::error::AugmentResult;
use crate::rng::create_batch_rng;

/// Iterator adapter applying an augmenter to every batch of a source.
///
/// Each batch is augmented with an RNG seeded from the stream seed and the
/// batch's position, so two passes over the same source with the same seed
/// yield identical output. After the first error the stream is fused: the
/// failing batch's error is yielded once and every later call returns `None`.
#[derive(Debug)]
pub struct AugmentedBatches<'a, A, I> {
    augmenter: &'a A,
    batches: I,
    seed: u32,
    batch_index: u64,
    failed: bool,
}

impl<'a, A, I> AugmentedBatches<'a, A, I>
where
    A: Augment,
    I: Iterator<Item = Batch>,
{
    /// Wraps `batches`, augmenting each one lazily.
    pub fn new(augmenter: &'a A, batches: I, seed: u32) -> Self {
        Self {
            augmenter,
            batches,
            seed,
            batch_index: 0,
            failed: false,
        }
    }

    /// The stream's base seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl<A, I> Iterator for AugmentedBatches<'_, A, I>
where
    A: Augment,
    I: Iterator<Item = Batch>,
{
    type Item = AugmentResult<Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let batch = self.batches.next()?;
        let mut rng = create_batch_rng(self.seed, self.batch_index);
        self.batch_index += 1;

        let result = self.augmenter.augment(&batch, &mut rng);
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::augment::SemitoneShift;
    use crate::batch::{Spectrogram, TargetBatch};
    use crate::config::SemitoneShiftParams;
    use crate::targets::one_hot;
    use std::cell::Cell;

    fn small_batch(classes: &[usize]) -> Batch {
        let data = classes.iter().map(|_| Spectrogram::new(48, 2)).collect();
        let targets = one_hot(classes, 25).expect("classes fit");
        Batch::new(data, targets).expect("aligned batch")
    }

    fn source(n: usize) -> Vec<Batch> {
        (0..n).map(|i| small_batch(&[i % 25, 24])).collect()
    }

    #[test]
    fn test_stream_yields_batch_for_batch() {
        let augmenter = SemitoneShift::new(SemitoneShiftParams::default()).expect("valid params");
        let stream = augmenter.stream(source(4).into_iter(), 7);
        assert_eq!(stream.seed(), 7);
        let outputs: Vec<_> = stream.collect();
        assert_eq!(outputs.len(), 4);
        for output in outputs {
            let batch = output.expect("valid batch");
            assert_eq!(batch.len(), 2);
        }
    }

    #[test]
    fn test_stream_is_lazy() {
        let augmenter = SemitoneShift::new(SemitoneShiftParams::default()).expect("valid params");
        let served = Cell::new(0usize);
        let batches = source(5).into_iter().map(|batch| {
            served.set(served.get() + 1);
            batch
        });

        let taken: Vec<_> = augmenter.stream(batches, 7).take(2).collect();
        assert_eq!(taken.len(), 2);
        assert_eq!(served.get(), 2);
    }

    #[test]
    fn test_stream_restart_reproduces_output() {
        let augmenter = SemitoneShift::new(SemitoneShiftParams::default()).expect("valid params");

        let first: Vec<Batch> = augmenter
            .stream(source(3).into_iter(), 42)
            .map(|b| b.expect("valid batch"))
            .collect();
        let second: Vec<Batch> = augmenter
            .stream(source(3).into_iter(), 42)
            .map(|b| b.expect("valid batch"))
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_stream_seeds_batches_independently() {
        let augmenter = SemitoneShift::new(SemitoneShiftParams::default()).expect("valid params");

        // The same batch at two positions in one stream gets different draws.
        let classes = [0, 7, 3, 19, 11, 6, 14, 21];
        let twice = vec![small_batch(&classes), small_batch(&classes)];
        let outputs: Vec<Batch> = augmenter
            .stream(twice.into_iter(), 42)
            .map(|b| b.expect("valid batch"))
            .collect();
        assert_ne!(outputs[0].targets, outputs[1].targets);
    }

    #[test]
    fn test_stream_fuses_after_error() {
        let augmenter = SemitoneShift::new(SemitoneShiftParams::default()).expect("valid params");
        let malformed = Batch {
            data: vec![Spectrogram::new(48, 2)],
            targets: TargetBatch::new(2, 25),
        };
        let batches = vec![small_batch(&[1, 2]), malformed, small_batch(&[3, 4])];

        let mut stream = augmenter.stream(batches.into_iter(), 7);
        assert!(matches!(stream.next(), Some(Ok(_))));
        assert!(matches!(stream.next(), Some(Err(_))));
        assert!(stream.next().is_none());
        assert!(stream.next().is_none());
    }
}
