//! Per-batch shift sampling.
//!
//! For a batch of `n` samples the sampler draws one shift per sample and then
//! forces a without-replacement subset of exactly `round(n * (1 - p))` entries
//! to zero, so a fraction of roughly `p` of the batch is perturbed. Entries
//! that keep their draw may still be zero by chance.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::error::{AugmentError, AugmentResult};

/// Draws per-sample shift amounts for a batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShiftSampler {
    p: f64,
}

impl ShiftSampler {
    /// Creates a sampler that perturbs a fraction `p` of each batch.
    ///
    /// `p` must be a finite value in `[0, 1]`.
    pub fn new(p: f64) -> AugmentResult<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(AugmentError::invalid_param(
                "p",
                format!("must be between 0 and 1, got {}", p),
            ));
        }
        Ok(Self { p })
    }

    /// The configured perturbed fraction.
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Draws integer semitone shifts, uniform over `[-max_shift, max_shift]`.
    ///
    /// Shifts are `i32`, so bounds above `i32::MAX` saturate to `i32::MAX`.
    pub fn semitone_shifts(&self, n: usize, max_shift: u32, rng: &mut Pcg32) -> Vec<i32> {
        let bound = max_shift.min(i32::MAX as u32) as i32;
        let mut shifts: Vec<i32> = (0..n).map(|_| rng.gen_range(-bound..=bound)).collect();
        self.zero_subset(&mut shifts, 0, rng);
        shifts
    }

    /// Draws real-valued detuning shifts, uniform over `[-max_shift, max_shift]`.
    pub fn detune_shifts(&self, n: usize, max_shift: f64, rng: &mut Pcg32) -> Vec<f64> {
        let mut shifts: Vec<f64> = (0..n)
            .map(|_| {
                if max_shift > 0.0 {
                    rng.gen_range(-max_shift..=max_shift)
                } else {
                    0.0
                }
            })
            .collect();
        self.zero_subset(&mut shifts, 0.0, rng);
        shifts
    }

    /// Number of entries forced to zero for a batch of `n`.
    pub fn unshifted_count(&self, n: usize) -> usize {
        let count = (n as f64 * (1.0 - self.p)).round() as usize;
        count.min(n)
    }

    fn zero_subset<T: Copy>(&self, shifts: &mut [T], zero: T, rng: &mut Pcg32) {
        let count = self.unshifted_count(shifts.len());
        for index in rand::seq::index::sample(rng, shifts.len(), count) {
            shifts[index] = zero;
        }
    }
}
