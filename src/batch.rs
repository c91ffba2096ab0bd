//! Batch containers: spectrogram samples and their training targets.
//!
//! A [`Batch`] pairs `N` spectrograms with an `N`-row target matrix. Both
//! carriers are flat row-major `Vec<f64>` buffers; the frequency axis is the
//! row axis of a [`Spectrogram`], so a pitch shift moves whole rows.

use crate::error::{AugmentError, AugmentResult};

/// A single 2-D spectrogram sample, frequency bins by time frames.
///
/// Stored row-major with the frequency axis outermost:
/// `values[bin * frames + frame]`. Bin 0 is the lowest frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrogram {
    /// Number of frequency bins.
    pub bins: usize,
    /// Number of time frames.
    pub frames: usize,
    /// Magnitude values, row-major.
    pub values: Vec<f64>,
}

impl Spectrogram {
    /// Creates a zero-filled spectrogram.
    pub fn new(bins: usize, frames: usize) -> Self {
        Self {
            bins,
            frames,
            values: vec![0.0; bins * frames],
        }
    }

    /// Creates a spectrogram from an existing row-major buffer.
    ///
    /// Fails if the buffer length does not equal `bins * frames`.
    pub fn from_values(bins: usize, frames: usize, values: Vec<f64>) -> AugmentResult<Self> {
        if values.len() != bins * frames {
            return Err(AugmentError::invalid_param(
                "values",
                format!(
                    "expected {} values for {} bins x {} frames, got {}",
                    bins * frames,
                    bins,
                    frames,
                    values.len()
                ),
            ));
        }
        Ok(Self {
            bins,
            frames,
            values,
        })
    }

    /// Value at (bin, frame).
    #[inline]
    pub fn get(&self, bin: usize, frame: usize) -> f64 {
        self.values[bin * self.frames + frame]
    }

    /// Sets the value at (bin, frame).
    #[inline]
    pub fn set(&mut self, bin: usize, frame: usize, value: f64) {
        self.values[bin * self.frames + frame] = value;
    }

    /// All frames of one frequency bin.
    #[inline]
    pub fn row(&self, bin: usize) -> &[f64] {
        &self.values[bin * self.frames..(bin + 1) * self.frames]
    }

    /// Mutable view of one frequency bin.
    #[inline]
    pub fn row_mut(&mut self, bin: usize) -> &mut [f64] {
        &mut self.values[bin * self.frames..(bin + 1) * self.frames]
    }
}

/// Targets for a batch: one row of width `width` per sample.
///
/// The same carrier serves one-hot chord classes (width `C`) and chroma
/// vectors (width `12 * T` for `T` frames per sample).
#[derive(Debug, Clone, PartialEq)]
pub struct TargetBatch {
    /// Number of target rows (one per sample).
    pub rows: usize,
    /// Width of every row.
    pub width: usize,
    /// Row-major values.
    pub values: Vec<f64>,
}

impl TargetBatch {
    /// Creates a zero-filled target matrix.
    pub fn new(rows: usize, width: usize) -> Self {
        Self {
            rows,
            width,
            values: vec![0.0; rows * width],
        }
    }

    /// Builds a target matrix from per-sample rows.
    ///
    /// All rows must share one width; a ragged input fails.
    pub fn from_rows(rows: &[Vec<f64>]) -> AugmentResult<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let mut values = Vec::with_capacity(rows.len() * width);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(AugmentError::target_shape(
                    row.len(),
                    format!("row {} differs from row 0 width {}", i, width),
                ));
            }
            values.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            width,
            values,
        })
    }

    /// One target row.
    #[inline]
    pub fn row(&self, index: usize) -> &[f64] {
        &self.values[index * self.width..(index + 1) * self.width]
    }

    /// Mutable view of one target row.
    #[inline]
    pub fn row_mut(&mut self, index: usize) -> &mut [f64] {
        &mut self.values[index * self.width..(index + 1) * self.width]
    }
}

/// One training batch: spectrogram samples paired with target rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// Spectrogram samples.
    pub data: Vec<Spectrogram>,
    /// Target rows, aligned with `data` by index.
    pub targets: TargetBatch,
}

impl Batch {
    /// Pairs samples with targets, checking that the counts agree.
    pub fn new(data: Vec<Spectrogram>, targets: TargetBatch) -> AugmentResult<Self> {
        if data.len() != targets.rows {
            return Err(AugmentError::BatchMismatch {
                data: data.len(),
                targets: targets.rows,
            });
        }
        Ok(Self { data, targets })
    }

    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Re-checks the data contract on an incoming batch.
    ///
    /// Fields are public, so a batch built elsewhere may disagree with its own
    /// declared shapes; augmenters call this before touching any buffer.
    pub fn validate(&self) -> AugmentResult<()> {
        if self.data.len() != self.targets.rows {
            return Err(AugmentError::BatchMismatch {
                data: self.data.len(),
                targets: self.targets.rows,
            });
        }
        if self.targets.values.len() != self.targets.rows * self.targets.width {
            return Err(AugmentError::target_shape(
                self.targets.width,
                format!(
                    "target buffer holds {} values, expected {} rows x {}",
                    self.targets.values.len(),
                    self.targets.rows,
                    self.targets.width
                ),
            ));
        }
        for (index, sample) in self.data.iter().enumerate() {
            if sample.values.len() != sample.bins * sample.frames {
                return Err(AugmentError::SampleShape {
                    index,
                    len: sample.values.len(),
                    bins: sample.bins,
                    frames: sample.frames,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spectrogram_indexing_is_row_major() {
        let mut spec = Spectrogram::new(3, 4);
        spec.set(2, 1, 0.5);
        assert_eq!(spec.get(2, 1), 0.5);
        assert_eq!(spec.values[2 * 4 + 1], 0.5);
    }

    #[test]
    fn test_spectrogram_row_views() {
        let spec = Spectrogram::from_values(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .expect("valid buffer");
        assert_eq!(spec.row(0), &[1.0, 2.0, 3.0]);
        assert_eq!(spec.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_spectrogram_from_values_rejects_bad_length() {
        let result = Spectrogram::from_values(2, 3, vec![0.0; 5]);
        assert!(result.is_err());
    }

    #[test]
    fn test_target_batch_from_rows() {
        let targets =
            TargetBatch::from_rows(&[vec![1.0, 0.0], vec![0.0, 1.0]]).expect("aligned rows");
        assert_eq!(targets.rows, 2);
        assert_eq!(targets.width, 2);
        assert_eq!(targets.row(1), &[0.0, 1.0]);
    }

    #[test]
    fn test_target_batch_rejects_ragged_rows() {
        let result = TargetBatch::from_rows(&[vec![1.0, 0.0], vec![0.0]]);
        assert!(matches!(result, Err(AugmentError::TargetShape { .. })));
    }

    #[test]
    fn test_batch_new_rejects_mismatched_lengths() {
        let data = vec![Spectrogram::new(4, 2)];
        let targets = TargetBatch::new(2, 3);
        let result = Batch::new(data, targets);
        assert!(matches!(result, Err(AugmentError::BatchMismatch { .. })));
    }

    #[test]
    fn test_validate_catches_corrupt_sample_buffer() {
        let mut batch = Batch::new(vec![Spectrogram::new(4, 2)], TargetBatch::new(1, 3))
            .expect("aligned batch");
        batch.data[0].values.pop();
        assert!(matches!(
            batch.validate(),
            Err(AugmentError::SampleShape { index: 0, .. })
        ));
    }
}
