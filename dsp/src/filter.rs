use crate::{
    math::{cos, sin},
    poly_real::{magnitude_response, multiply_fractions},
    traits::BasicFilter,
};
use alloc::{vec, vec::Vec};
use core::f64::consts::PI;

/// Number of formant filters a phoneme voice runs its source through.
pub const FORMANT_COUNT: usize = 3;

/// Lowest centre frequency a band-pass filter accepts, in Hz.
const MIN_CENTRE: f64 = 20.0;
/// Highest centre frequency a band-pass filter accepts, as a fraction of the sample rate.
const MAX_CENTRE_RATIO: f64 = 0.45;

/// A second order band-pass filter (constant 0 dB peak gain).
///
/// This is the same recursive structure as a formant resonator, with a zero
/// at DC and at Nyquist so the filter only passes the band around its centre.
#[derive(Clone, Debug)]
pub struct BandPass {
    sample_rate: usize,
    /// feed-forward coefficient for x[n], normalised by a0
    b0: f64,
    /// feed-forward coefficient for x[n-2], normalised by a0
    b2: f64,
    /// feedback coefficient for y[n-1], normalised by a0
    a1: f64,
    /// feedback coefficient for y[n-2], normalised by a0
    a2: f64,
    /// x[n-1]
    x1: f64,
    /// x[n-2]
    x2: f64,
    /// y[n-1], last output value
    y1: f64,
    /// y[n-2], second-last output value
    y2: f64,
    centre: f64,
    passthrough: bool,
}

impl BandPass {
    /// Creates a filter that passes its input unchanged until [`BandPass::set`] is called.
    #[must_use]
    pub fn new(sample_rate: usize) -> Self {
        BandPass {
            sample_rate,
            b0: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            centre: 0.0,
            passthrough: true,
        }
    }

    /// Adjusts the filter parameters without resetting the inner state.
    /// The centre frequency is clamped to `20 Hz ..= 0.45 * sample_rate`.
    ///
    /// ### params
    /// ```text
    /// f = Centre frequency in Hz.
    /// q = Quality factor; higher is narrower.
    /// ```
    ///
    /// # Errors
    ///
    /// Fails for a non-finite frequency or a non-positive or non-finite `q`.
    pub fn set(&mut self, f: f64, q: f64) -> Result<(), &'static str> {
        if !f.is_finite() || !q.is_finite() || q <= 0.0 || self.sample_rate == 0 {
            return Err("Invalid band-pass parameters.");
        }
        let sample_rate = self.sample_rate as f64;
        let f = f.clamp(MIN_CENTRE, sample_rate * MAX_CENTRE_RATIO);
        let w = 2.0 * PI * f / sample_rate;
        let alpha = sin(w) / (2.0 * q);
        let a0 = 1.0 + alpha;
        self.b0 = alpha / a0;
        self.b2 = -alpha / a0;
        self.a1 = -2.0 * cos(w) / a0;
        self.a2 = (1.0 - alpha) / a0;
        self.centre = f;
        self.passthrough = false;
        Ok(())
    }

    /// The centre frequency after clamping, or 0 while the filter is not set.
    #[must_use]
    pub fn centre(&self) -> f64 {
        self.centre
    }
}

impl BasicFilter for BandPass {
    fn transfer_function_coefficients(&self) -> Vec<Vec<f64>> {
        if self.passthrough {
            return vec![vec![1.0], vec![1.0]];
        }
        vec![vec![self.b0, 0.0, self.b2], vec![1.0, self.a1, self.a2]]
    }

    fn step(&mut self, x: f64) -> f64 {
        if self.passthrough {
            return x;
        }
        let y = self.b0 * x + self.b2 * self.x2 - self.a1 * self.y1 - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

/// Three band-pass filters in series, lowest formant first.
#[derive(Clone, Debug)]
pub struct FormantCascade {
    sample_rate: usize,
    filters: [BandPass; FORMANT_COUNT],
}

impl FormantCascade {
    #[must_use]
    pub fn new(sample_rate: usize) -> Self {
        FormantCascade {
            sample_rate,
            filters: core::array::from_fn(|_| BandPass::new(sample_rate)),
        }
    }

    /// Sets every stage. `centres[i]` is paired with `qs[i]`.
    ///
    /// # Errors
    ///
    /// Fails if any stage rejects its parameters; stages set before the failure keep their
    /// new values.
    pub fn set(
        &mut self,
        centres: [f64; FORMANT_COUNT],
        qs: [f64; FORMANT_COUNT],
    ) -> Result<(), &'static str> {
        for ((filter, f), q) in self.filters.iter_mut().zip(centres).zip(qs) {
            filter.set(f, q)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn filters(&self) -> &[BandPass; FORMANT_COUNT] {
        &self.filters
    }

    /// Returns the transfer function of the whole cascade as a `[numerator, denominator]` fraction.
    ///
    /// # Errors
    ///
    /// Propagates polynomial arithmetic failures.
    pub fn transfer_function(&self) -> Result<Vec<Vec<f64>>, &'static str> {
        let mut fraction = vec![vec![1.0], vec![1.0]];
        for filter in &self.filters {
            fraction =
                multiply_fractions(&fraction, &filter.transfer_function_coefficients(), None)?;
        }
        Ok(fraction)
    }

    /// Largest magnitude response of the cascade, measured at each stage's centre frequency.
    ///
    /// # Errors
    ///
    /// Fails if the cascade has a pole on the unit circle.
    pub fn peak_gain(&self) -> Result<f64, &'static str> {
        let fraction = self.transfer_function()?;
        let sample_rate = self.sample_rate as f64;
        let mut peak = 0.0_f64;
        for filter in &self.filters {
            let f = if filter.centre() > 0.0 {
                filter.centre()
            } else {
                1000.0_f64.min(sample_rate / 4.0)
            };
            let w = 2.0 * PI * f / sample_rate;
            peak = peak.max(magnitude_response(&fraction, w)?);
        }
        Ok(peak)
    }
}

impl BasicFilter for FormantCascade {
    fn transfer_function_coefficients(&self) -> Vec<Vec<f64>> {
        self.transfer_function()
            .unwrap_or_else(|_| vec![vec![0.0], vec![1.0]])
    }

    fn step(&mut self, x: f64) -> f64 {
        self.filters.iter_mut().fold(x, |acc, filter| filter.step(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_filter_passes_input() {
        let mut bp = BandPass::new(44_100);
        assert_eq!(bp.step(0.25), 0.25);
        assert_eq!(bp.transfer_function_coefficients(), vec![vec![1.0], vec![1.0]]);
    }

    #[test]
    fn rejects_bad_q() {
        let mut bp = BandPass::new(44_100);
        assert!(bp.set(500.0, 0.0).is_err());
        assert!(bp.set(f64::NAN, 4.0).is_err());
    }

    #[test]
    fn centre_is_clamped_below_nyquist() {
        let mut bp = BandPass::new(8_000);
        bp.set(7_000.0, 4.0).unwrap();
        assert!((bp.centre() - 3_600.0).abs() < 1e-9);
        bp.set(1.0, 4.0).unwrap();
        assert!((bp.centre() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn unit_gain_at_centre() {
        let mut bp = BandPass::new(44_100);
        bp.set(1_000.0, 8.0).unwrap();
        let w = 2.0 * PI * 1_000.0 / 44_100.0;
        let g = magnitude_response(&bp.transfer_function_coefficients(), w).unwrap();
        assert!((g - 1.0).abs() < 1e-9, "{g}");
    }

    #[test]
    fn cascade_peak_gain_below_unity() {
        let mut cascade = FormantCascade::new(44_100);
        cascade
            .set([500.0, 1_500.0, 2_500.0], [8.0, 6.0, 4.0])
            .unwrap();
        let peak = cascade.peak_gain().unwrap();
        assert!(peak > 0.0 && peak < 1.0, "{peak}");
        assert_eq!(cascade.transfer_function().unwrap()[1].len(), 7);
    }
}
