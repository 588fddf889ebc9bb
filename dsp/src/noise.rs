use rand::Rng;

/// Returns a uniformly distributed sample in `-1.0 ..= 1.0`.
pub fn white_noise<R: Rng>(rng: &mut R) -> f64 {
    let x = rng.random_range(-1.0..=1.0);
    debug_assert!(x >= -1.0, "{x} is too small");
    debug_assert!(x <= 1.0, "{x} is too big");
    x
}

/// A white noise source that owns its random number generator.
#[derive(Clone, Debug)]
pub struct WhiteNoise<R> {
    rng: R,
    amplitude: f64,
}

impl<R: Rng> WhiteNoise<R> {
    /// Creates a source with peak amplitude `amplitude`.
    pub fn new(rng: R, amplitude: f64) -> Self {
        WhiteNoise { rng, amplitude }
    }

    pub fn next_sample(&mut self) -> f64 {
        white_noise(&mut self.rng) * self.amplitude
    }
}
