//! The augmenters: semitone transposition and sub-semitone detuning.
//!
//! Both are pure per-batch transforms: configuration is fixed at
//! construction, randomness comes in through an injected [`Pcg32`], and no
//! state survives from one batch to the next. [`Augmenter`] closes the set
//! for registry construction and [`AugmenterStack`] chains several augmenters
//! into one transform.

use rand_pcg::Pcg32;

use crate::batch::Batch;
use crate::config::{DetuningParams, SemitoneShiftParams, TargetType};
use crate::error::{AugmentError, AugmentResult};
use crate::sampler::ShiftSampler;
use crate::shift::{detune_shift, semitone_shift};
use crate::stream::AugmentedBatches;
use crate::targets::{remap_chord_classes, rotate_chroma};

/// Per-batch augmentation behavior, shared by single augmenters and stacks.
pub trait Augment {
    /// Transforms one batch, drawing randomness from `rng`.
    ///
    /// The input is never mutated; the result is a fresh batch of the same
    /// size and shapes.
    fn augment(&self, batch: &Batch, rng: &mut Pcg32) -> AugmentResult<Batch>;

    /// Wraps a batch source in a lazily augmented stream.
    ///
    /// Each batch gets an independent RNG derived from `seed` and its
    /// position, so restarting the stream over the same source reproduces the
    /// same output.
    fn stream<I>(&self, batches: I, seed: u32) -> AugmentedBatches<'_, Self, I>
    where
        Self: Sized,
        I: Iterator<Item = Batch>,
    {
        AugmentedBatches::new(self, batches, seed)
    }
}

/// Transposes spectrograms by whole semitones and remaps targets to match.
#[derive(Debug, Clone, PartialEq)]
pub struct SemitoneShift {
    sampler: ShiftSampler,
    max_shift: u32,
    bins_per_semitone: u32,
    target_type: TargetType,
}

impl SemitoneShift {
    /// Validates the parameters and builds the augmenter.
    pub fn new(params: SemitoneShiftParams) -> AugmentResult<Self> {
        let sampler = ShiftSampler::new(params.p)?;
        if params.bins_per_semitone == 0 {
            return Err(AugmentError::invalid_param(
                "bins_per_semitone",
                "must be at least 1",
            ));
        }
        // Shifts are drawn as i32, so the bound must fit one.
        if params.max_shift > i32::MAX as u32 {
            return Err(AugmentError::invalid_param(
                "max_shift",
                format!("must be at most {}, got {}", i32::MAX, params.max_shift),
            ));
        }
        Ok(Self {
            sampler,
            max_shift: params.max_shift,
            bins_per_semitone: params.bins_per_semitone,
            target_type: params.target_type,
        })
    }

    /// The configured transposition bound in semitones.
    pub fn max_shift(&self) -> u32 {
        self.max_shift
    }

    /// The target encoding this augmenter remaps.
    pub fn target_type(&self) -> TargetType {
        self.target_type
    }
}

impl Augment for SemitoneShift {
    fn augment(&self, batch: &Batch, rng: &mut Pcg32) -> AugmentResult<Batch> {
        batch.validate()?;
        let shifts = self
            .sampler
            .semitone_shifts(batch.len(), self.max_shift, rng);
        let targets = match self.target_type {
            TargetType::ChordsMajMin => remap_chord_classes(&batch.targets, &shifts)?,
            TargetType::Chroma => rotate_chroma(&batch.targets, &shifts)?,
        };
        let data = batch
            .data
            .iter()
            .zip(&shifts)
            .map(|(sample, &shift)| semitone_shift(sample, shift, self.bins_per_semitone))
            .collect();
        Batch::new(data, targets)
    }
}

/// Detunes spectrograms by less than half a semitone; targets pass through.
#[derive(Debug, Clone, PartialEq)]
pub struct Detuning {
    sampler: ShiftSampler,
    max_shift: f64,
    bins_per_semitone: u32,
}

impl Detuning {
    /// Validates the parameters and builds the augmenter.
    ///
    /// Fails when `max_shift` reaches half a semitone: at that point a
    /// detuned pitch is closer to the neighboring semitone and the unshifted
    /// targets would be wrong.
    pub fn new(params: DetuningParams) -> AugmentResult<Self> {
        let sampler = ShiftSampler::new(params.p)?;
        if params.bins_per_semitone == 0 {
            return Err(AugmentError::invalid_param(
                "bins_per_semitone",
                "must be at least 1",
            ));
        }
        if !params.max_shift.is_finite() || params.max_shift < 0.0 {
            return Err(AugmentError::invalid_param(
                "max_shift",
                format!("must be finite and non-negative, got {}", params.max_shift),
            ));
        }
        if params.max_shift >= 0.5 {
            return Err(AugmentError::DetuneTooLarge {
                max_shift: params.max_shift,
            });
        }
        Ok(Self {
            sampler,
            max_shift: params.max_shift,
            bins_per_semitone: params.bins_per_semitone,
        })
    }

    /// The configured detuning bound in semitones.
    pub fn max_shift(&self) -> f64 {
        self.max_shift
    }
}

impl Augment for Detuning {
    fn augment(&self, batch: &Batch, rng: &mut Pcg32) -> AugmentResult<Batch> {
        batch.validate()?;
        let shifts = self.sampler.detune_shifts(batch.len(), self.max_shift, rng);
        let data = batch
            .data
            .iter()
            .zip(&shifts)
            .map(|(sample, &shift)| detune_shift(sample, shift, self.bins_per_semitone))
            .collect();
        Batch::new(data, batch.targets.clone())
    }
}

/// The closed set of augmenters the registry can build.
#[derive(Debug, Clone, PartialEq)]
pub enum Augmenter {
    /// Whole-semitone transposition with target remapping.
    SemitoneShift(SemitoneShift),
    /// Sub-semitone detuning, targets untouched.
    Detuning(Detuning),
}

impl Augmenter {
    /// The registry name of this augmenter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SemitoneShift(_) => "SemitoneShift",
            Self::Detuning(_) => "Detuning",
        }
    }
}

impl Augment for Augmenter {
    fn augment(&self, batch: &Batch, rng: &mut Pcg32) -> AugmentResult<Batch> {
        match self {
            Self::SemitoneShift(augmenter) => augmenter.augment(batch, rng),
            Self::Detuning(augmenter) => augmenter.augment(batch, rng),
        }
    }
}

impl From<SemitoneShift> for Augmenter {
    fn from(augmenter: SemitoneShift) -> Self {
        Self::SemitoneShift(augmenter)
    }
}

impl From<Detuning> for Augmenter {
    fn from(augmenter: Detuning) -> Self {
        Self::Detuning(augmenter)
    }
}

/// Several augmenters applied in order as one per-batch transform.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AugmenterStack {
    augmenters: Vec<Augmenter>,
}

impl AugmenterStack {
    /// Builds a stack applying `augmenters` front to back.
    pub fn new(augmenters: Vec<Augmenter>) -> Self {
        Self { augmenters }
    }

    /// Appends an augmenter to the end of the stack.
    pub fn push(&mut self, augmenter: impl Into<Augmenter>) {
        self.augmenters.push(augmenter.into());
    }

    /// The augmenters in application order.
    pub fn augmenters(&self) -> &[Augmenter] {
        &self.augmenters
    }

    /// Number of augmenters in the stack.
    pub fn len(&self) -> usize {
        self.augmenters.len()
    }

    /// True when the stack holds no augmenters.
    pub fn is_empty(&self) -> bool {
        self.augmenters.is_empty()
    }
}

impl Augment for AugmenterStack {
    fn augment(&self, batch: &Batch, rng: &mut Pcg32) -> AugmentResult<Batch> {
        // Members draw from the shared rng in application order, so a stack
        // is as deterministic as a single augmenter.
        match self.augmenters.split_first() {
            Some((first, rest)) => {
                let mut current = first.augment(batch, rng)?;
                for augmenter in rest {
                    current = augmenter.augment(&current, rng)?;
                }
                Ok(current)
            }
            None => {
                batch.validate()?;
                Ok(batch.clone())
            }
        }
    }
}
