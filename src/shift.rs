//! Frequency-axis shifts of a single spectrogram.
//!
//! Both shift modes move energy along the frequency axis only; every time
//! frame inside a bin moves together. The semitone mode is circular (energy
//! wrapping from one edge reappears at the other), the detuning mode is an
//! interpolated sub-bin shift that attenuates at the edges instead of
//! wrapping.

use crate::batch::Spectrogram;

/// Circularly shifts a spectrogram by a whole number of semitones.
///
/// The bin displacement is `semitones * bins_per_semitone`; positive values
/// move energy toward higher bins. Rows that leave one edge re-enter at the
/// other, so the output holds exactly the input's energy.
pub fn semitone_shift(spec: &Spectrogram, semitones: i32, bins_per_semitone: u32) -> Spectrogram {
    let displacement = semitones as i64 * bins_per_semitone as i64;
    if displacement == 0 || spec.bins == 0 {
        return spec.clone();
    }

    let bins = spec.bins as i64;
    let mut out = Spectrogram::new(spec.bins, spec.frames);
    for bin in 0..spec.bins {
        let src = (bin as i64 - displacement).rem_euclid(bins) as usize;
        out.row_mut(bin).copy_from_slice(spec.row(src));
    }
    out
}

/// Shifts a spectrogram by a fractional number of semitones.
///
/// The real-valued bin displacement is `semitones * bins_per_semitone`;
/// positive values move energy toward higher bins. Each output bin reads a
/// linear interpolation of the two source bins straddling its displaced
/// position; source positions outside the frequency range contribute zero, so
/// energy shifted past an edge fades out rather than wrapping. A displacement
/// of zero reproduces the input exactly.
pub fn detune_shift(spec: &Spectrogram, semitones: f64, bins_per_semitone: u32) -> Spectrogram {
    let displacement = semitones * bins_per_semitone as f64;
    if displacement == 0.0 || spec.bins == 0 {
        return spec.clone();
    }

    let bins = spec.bins as i64;
    let mut out = Spectrogram::new(spec.bins, spec.frames);
    for bin in 0..spec.bins {
        let src = bin as f64 - displacement;
        let low = src.floor();
        let frac = src - low;
        let low_bin = low as i64;
        let high_bin = low_bin + 1;

        for frame in 0..spec.frames {
            let mut value = 0.0;
            if (0..bins).contains(&low_bin) {
                value += (1.0 - frac) * spec.get(low_bin as usize, frame);
            }
            if (0..bins).contains(&high_bin) {
                value += frac * spec.get(high_bin as usize, frame);
            }
            out.set(bin, frame, value);
        }
    }
    out
}
