use crate::math::sin;
use core::f64::consts::PI;

/// Periodic source shapes, from softest to richest in harmonics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
    Sawtooth,
}

/// Polynomial band-limited step, subtracted around each discontinuity.
fn poly_blep(t: f64, dt: f64) -> f64 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}

fn wrap(phase: f64) -> f64 {
    if phase >= 1.0 { phase - 1.0 } else { phase }
}

/// A phase-accumulating oscillator. The frequency is passed per sample so it
/// can follow a ramp.
#[derive(Clone, Debug)]
pub struct Oscillator {
    waveform: Waveform,
    sample_rate: usize,
    /// position within the current cycle, `0.0 .. 1.0`
    phase: f64,
}

impl Oscillator {
    #[must_use]
    pub fn new(waveform: Waveform, sample_rate: usize) -> Self {
        Oscillator {
            waveform,
            sample_rate,
            phase: 0.0,
        }
    }

    #[must_use]
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Produces one sample in `-1.0 ..= 1.0` and advances the phase by `freq / sample_rate`.
    /// Every waveform starts at 0 and rises.
    pub fn next_sample(&mut self, freq: f64) -> f64 {
        let dt = if self.sample_rate == 0 || !freq.is_finite() {
            0.0
        } else {
            (freq / self.sample_rate as f64).clamp(0.0, 0.5)
        };
        let t = self.phase;
        let value = match self.waveform {
            Waveform::Sine => sin(2.0 * PI * t),
            Waveform::Triangle => {
                let shifted = wrap(t + 0.25);
                1.0 - 4.0 * (shifted - 0.5).abs()
            }
            Waveform::Square => {
                let naive = if t < 0.5 { 1.0 } else { -1.0 };
                naive + poly_blep(t, dt) - poly_blep(wrap(t + 0.5), dt)
            }
            Waveform::Sawtooth => {
                let shifted = wrap(t + 0.5);
                2.0 * shifted - 1.0 - poly_blep(shifted, dt)
            }
        };
        self.phase = wrap(t + dt);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cycle(waveform: Waveform, freq: f64) -> Vec<f64> {
        let mut osc = Oscillator::new(waveform, 8_000);
        (0..8_000 / freq as usize).map(|_| osc.next_sample(freq)).collect()
    }

    #[test]
    fn every_waveform_starts_at_zero() {
        for waveform in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Sawtooth,
        ] {
            let first = Oscillator::new(waveform, 8_000).next_sample(100.0);
            assert!(first.abs() < 1e-12, "{waveform:?} starts at {first}");
        }
    }

    #[test]
    fn output_stays_in_range() {
        for waveform in [
            Waveform::Sine,
            Waveform::Triangle,
            Waveform::Square,
            Waveform::Sawtooth,
        ] {
            for s in cycle(waveform, 440.0) {
                assert!((-1.0..=1.0).contains(&s), "{waveform:?}: {s}");
            }
        }
    }

    #[test]
    fn square_is_zero_mean() {
        let samples = cycle(Waveform::Square, 100.0);
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.01, "{mean}");
    }

    #[test]
    fn triangle_peaks_at_quarter_cycle() {
        let samples = cycle(Waveform::Triangle, 100.0);
        assert!((samples[20] - 1.0).abs() < 1e-9);
        assert!((samples[60] + 1.0).abs() < 1e-9);
    }
}
