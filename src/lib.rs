//! chordaug
//!
//! Pitch augmentation for spectrogram training batches:
//! - `SemitoneShift` - whole-semitone transposition with matching target remapping
//! - `Detuning` - sub-semitone detuning, targets untouched
//!
//! # Overview
//!
//! Chord-recognition models train on pairs of log-frequency spectrograms and
//! symbolic targets (one-hot chord classes or chroma vectors). Transposing a
//! recording by a few semitones yields a new, equally valid training pair,
//! provided the target moves with the audio. This crate applies that
//! transposition directly to the spectrogram's frequency axis and rewrites
//! the targets consistently, including the reserved no-chord class, which
//! never moves. Detuning perturbs the frequency axis by less than half a
//! semitone, small enough that chord identity, and therefore the target,
//! stays put.
//!
//! Augmenters transform batches one at a time, either directly through
//! [`Augment::augment`] or lazily over any batch iterator through
//! [`Augment::stream`]. The [`registry`] builds augmenters from
//! `{name: parameters}` configuration maps.
//!
//! # Determinism
//!
//! All augmentation is deterministic. Randomness flows through injected
//! PCG32 generators seeded from a `u32`; streams derive an independent seed
//! per batch via BLAKE3 hashing, so a restarted stream reproduces its output
//! exactly.
//!
//! # Example
//!
//! ```
//! use chordaug::rng::create_rng;
//! use chordaug::targets::one_hot;
//! use chordaug::{Augment, Batch, SemitoneShift, SemitoneShiftParams, Spectrogram};
//!
//! # fn main() -> chordaug::AugmentResult<()> {
//! let augmenter = SemitoneShift::new(SemitoneShiftParams::default())?;
//!
//! // Four samples of 48 log-frequency bins by 32 frames, with one-hot
//! // targets over 24 chord classes plus the trailing no-chord class.
//! let batch = Batch::new(
//!     vec![Spectrogram::new(48, 32); 4],
//!     one_hot(&[0, 7, 13, 24], 25)?,
//! )?;
//!
//! let mut rng = create_rng(42);
//! let augmented = augmenter.augment(&batch, &mut rng)?;
//! assert_eq!(augmented.len(), batch.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Structure
//!
//! - [`augment`] - the augmenters, the [`Augment`] trait, and stacks
//! - [`batch`] - spectrogram and target containers
//! - [`config`] - parameter types and the default configuration bundle
//! - [`registry`] - explicit name-to-constructor table
//! - [`rng`] - deterministic RNG with seed derivation
//! - [`sampler`] - per-batch shift sampling
//! - [`shift`] - frequency-axis shifts of a single spectrogram
//! - [`stream`] - lazy augmentation of batch iterators
//! - [`targets`] - chord-class remapping and chroma rotation

pub mod augment;
pub mod batch;
pub mod config;
pub mod error;
pub mod registry;
pub mod rng;
pub mod sampler;
pub mod shift;
pub mod stream;
pub mod targets;

// Re-export main types at crate root
pub use augment::{Augment, Augmenter, AugmenterStack, Detuning, SemitoneShift};
pub use batch::{Batch, Spectrogram, TargetBatch};
pub use config::{default_augmentation, DetuningParams, SemitoneShiftParams, TargetType};
pub use error::{AugmentError, AugmentResult};
pub use registry::AugmenterRegistry;
pub use stream::AugmentedBatches;
