//! Augmenter parameter types.
//!
//! Parameters arrive either as plain Rust values or as JSON maps handed to
//! the registry; both paths funnel into the same structs, and every field
//! falls back to the canonical default when omitted.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AugmentError;

/// Target encoding handled by the semitone-shift augmenter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// One-hot chord classes, `quality * 12 + root` with a trailing no-chord
    /// sentinel.
    #[default]
    ChordsMajMin,
    /// Chroma vectors, 12 pitch classes per frame.
    Chroma,
}

impl TargetType {
    /// The configuration string for this encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ChordsMajMin => "chords_maj_min",
            Self::Chroma => "chroma",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = AugmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chords_maj_min" => Ok(Self::ChordsMajMin),
            "chroma" => Ok(Self::Chroma),
            other => Err(AugmentError::UnknownTargetType {
                value: other.to_string(),
            }),
        }
    }
}

/// Parameters for the semitone-shift augmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SemitoneShiftParams {
    /// Fraction of each batch to perturb (0.0 to 1.0). Default: 1.0.
    #[serde(default = "default_p")]
    pub p: f64,
    /// Largest transposition in either direction, in whole semitones.
    /// Default: 4.
    #[serde(default = "default_semitone_max_shift")]
    pub max_shift: u32,
    /// Frequency-axis resolution in bins per semitone. Default: 2.
    #[serde(default = "default_bins_per_semitone")]
    pub bins_per_semitone: u32,
    /// Target encoding to remap alongside the data. Default: `chords_maj_min`.
    #[serde(default)]
    pub target_type: TargetType,
}

fn default_p() -> f64 {
    1.0
}

fn default_semitone_max_shift() -> u32 {
    4
}

fn default_bins_per_semitone() -> u32 {
    2
}

impl Default for SemitoneShiftParams {
    fn default() -> Self {
        Self {
            p: default_p(),
            max_shift: default_semitone_max_shift(),
            bins_per_semitone: default_bins_per_semitone(),
            target_type: TargetType::default(),
        }
    }
}

/// Parameters for the detuning augmenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetuningParams {
    /// Fraction of each batch to perturb (0.0 to 1.0). Default: 1.0.
    #[serde(default = "default_p")]
    pub p: f64,
    /// Largest detuning in either direction, in semitones. Must stay below
    /// 0.5; construction fails otherwise. Default: 0.4.
    #[serde(default = "default_detune_max_shift")]
    pub max_shift: f64,
    /// Frequency-axis resolution in bins per semitone. Default: 2.
    #[serde(default = "default_bins_per_semitone")]
    pub bins_per_semitone: u32,
}

fn default_detune_max_shift() -> f64 {
    0.4
}

impl Default for DetuningParams {
    fn default() -> Self {
        Self {
            p: default_p(),
            max_shift: default_detune_max_shift(),
            bins_per_semitone: default_bins_per_semitone(),
        }
    }
}

/// The canonical augmentation bundle: both augmenters at their default
/// parameters, keyed by registry name. Feed it to
/// [`AugmenterRegistry::build_stack`](crate::registry::AugmenterRegistry::build_stack).
pub fn default_augmentation() -> serde_json::Map<String, Value> {
    let mut config = serde_json::Map::new();
    config.insert(
        "SemitoneShift".to_string(),
        json!({ "p": 1.0, "max_shift": 4, "bins_per_semitone": 2 }),
    );
    config.insert(
        "Detuning".to_string(),
        json!({ "p": 1.0, "max_shift": 0.4, "bins_per_semitone": 2 }),
    );
    config
}
