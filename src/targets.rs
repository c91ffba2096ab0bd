//! Target remapping under pitch transposition.
//!
//! Chord-class targets are one-hot rows over `C` classes laid out as
//! `class = quality * 12 + root`, with the last class reserved as the
//! no-chord sentinel. A transposition by `s` semitones moves the root by
//! `s mod 12` and leaves the quality and the sentinel alone. Chroma targets
//! rotate each 12-element pitch-class frame by the shift directly.

use crate::batch::TargetBatch;
use crate::error::{AugmentError, AugmentResult};

/// Number of pitch classes in an octave.
pub const PITCH_CLASSES: usize = 12;

/// Encodes class indices as one-hot rows of the given width.
pub fn one_hot(classes: &[usize], width: usize) -> AugmentResult<TargetBatch> {
    let mut out = TargetBatch::new(classes.len(), width);
    for (index, &class) in classes.iter().enumerate() {
        if class >= width {
            return Err(AugmentError::target_shape(
                width,
                format!("class {} in row {} does not fit", class, index),
            ));
        }
        out.row_mut(index)[class] = 1.0;
    }
    Ok(out)
}

/// Decodes each target row to its argmax class index.
///
/// Ties resolve to the lowest index, and the result is integral from the
/// start, so downstream quality extraction divides whole numbers only.
pub fn decode_classes(targets: &TargetBatch) -> Vec<usize> {
    (0..targets.rows).map(|i| argmax(targets.row(i))).collect()
}

fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (index, &value) in row.iter().enumerate() {
        if value > best_value {
            best = index;
            best_value = value;
        }
    }
    best
}

/// Remaps one-hot chord-class targets to match per-sample semitone shifts.
///
/// Each row decodes to a class, the root moves by the row's shift modulo 12
/// with the quality preserved, and the row re-encodes as one-hot. Rows
/// decoding to the sentinel stay on the sentinel whatever their shift.
///
/// The width must be `quality_count * 12 + 1`; anything else cannot hold the
/// `quality * 12 + root` layout plus its trailing sentinel and is rejected.
pub fn remap_chord_classes(targets: &TargetBatch, shifts: &[i32]) -> AugmentResult<TargetBatch> {
    if shifts.len() != targets.rows {
        return Err(AugmentError::BatchMismatch {
            data: shifts.len(),
            targets: targets.rows,
        });
    }
    let width = targets.width;
    if width < PITCH_CLASSES + 1 || (width - 1) % PITCH_CLASSES != 0 {
        return Err(AugmentError::target_shape(
            width,
            "chord targets need a multiple of 12 chord classes plus a trailing no-chord class",
        ));
    }

    let sentinel = width - 1;
    let mut out = TargetBatch::new(targets.rows, width);
    for (index, &shift) in shifts.iter().enumerate() {
        let class = argmax(targets.row(index));
        let new_class = if class == sentinel {
            sentinel
        } else {
            let root = class % PITCH_CLASSES;
            let quality = class / PITCH_CLASSES;
            let new_root = (root as i32 + shift).rem_euclid(PITCH_CLASSES as i32) as usize;
            quality * PITCH_CLASSES + new_root
        };
        out.row_mut(index)[new_class] = 1.0;
    }
    Ok(out)
}

/// Rotates chroma targets to match per-sample semitone shifts.
///
/// A row of width `12 * T` holds `T` consecutive pitch-class frames; each
/// frame rotates by its sample's shift in pitch classes, with no
/// `bins_per_semitone` scaling. Widths that are not a multiple of 12 are
/// rejected.
pub fn rotate_chroma(targets: &TargetBatch, shifts: &[i32]) -> AugmentResult<TargetBatch> {
    if shifts.len() != targets.rows {
        return Err(AugmentError::BatchMismatch {
            data: shifts.len(),
            targets: targets.rows,
        });
    }
    if targets.width % PITCH_CLASSES != 0 {
        return Err(AugmentError::target_shape(
            targets.width,
            "chroma targets need 12 pitch classes per frame",
        ));
    }

    let mut out = TargetBatch::new(targets.rows, targets.width);
    for (index, &shift) in shifts.iter().enumerate() {
        let source = targets.row(index);
        let dest = out.row_mut(index);
        for (frame, chunk) in source.chunks_exact(PITCH_CLASSES).enumerate() {
            for (pitch_class, &value) in chunk.iter().enumerate() {
                let rotated =
                    (pitch_class as i32 + shift).rem_euclid(PITCH_CLASSES as i32) as usize;
                dest[frame * PITCH_CLASSES + rotated] = value;
            }
        }
    }
    Ok(out)
}
