//! Error types for batch augmentation.

use thiserror::Error;

/// Result type for augmentation operations.
pub type AugmentResult<T> = Result<T, AugmentError>;

/// Errors that can occur while configuring or applying augmenters.
#[derive(Debug, Error)]
pub enum AugmentError {
    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Detuning bound at or above half a semitone.
    #[error("detuning max_shift must be below 0.5 semitones, got {max_shift}")]
    DetuneTooLarge {
        /// The rejected bound.
        max_shift: f64,
    },

    /// Unsupported target type string.
    #[error("unknown target type '{value}' (expected 'chords_maj_min' or 'chroma')")]
    UnknownTargetType {
        /// The rejected value.
        value: String,
    },

    /// Augmenter name not present in the registry.
    #[error("unknown augmenter '{name}'")]
    UnknownAugmenter {
        /// The requested name.
        name: String,
    },

    /// Augmenter name registered twice.
    #[error("augmenter '{name}' is already registered")]
    AlreadyRegistered {
        /// The conflicting name.
        name: String,
    },

    /// Data and targets disagree on batch size.
    #[error("batch size mismatch: {data} spectrograms vs {targets} target rows")]
    BatchMismatch {
        /// Number of spectrograms in the batch.
        data: usize,
        /// Number of target rows in the batch.
        targets: usize,
    },

    /// Target row width incompatible with the selected encoding.
    #[error("bad target width {width}: {message}")]
    TargetShape {
        /// The offending row width.
        width: usize,
        /// Error message.
        message: String,
    },

    /// Spectrogram buffer length disagrees with its declared dimensions.
    #[error("sample {index}: buffer holds {len} values, expected {bins} bins x {frames} frames")]
    SampleShape {
        /// Position of the sample in the batch.
        index: usize,
        /// Actual buffer length.
        len: usize,
        /// Declared frequency bins.
        bins: usize,
        /// Declared time frames.
        frames: usize,
    },

    /// Parameter map failed to deserialize.
    #[error("invalid augmenter parameters: {0}")]
    InvalidParams(#[from] serde_json::Error),
}

impl AugmentError {
    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates a target shape error.
    pub fn target_shape(width: usize, message: impl Into<String>) -> Self {
        Self::TargetShape {
            width,
            message: message.into(),
        }
    }
}
