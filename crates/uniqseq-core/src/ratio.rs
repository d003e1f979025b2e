use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Picks `first` with probability `ratio`, otherwise `second`.
#[derive(Debug, Clone)]
pub struct RatioPicker<T> {
    first: T,
    second: T,
    ratio: f64,
    rng: ChaCha8Rng,
}

impl<T: Clone> RatioPicker<T> {
    pub fn new(first: T, second: T, ratio: f64) -> Self {
        Self::with_rng(first, second, ratio, ChaCha8Rng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(first: T, second: T, ratio: f64, seed: u64) -> Self {
        Self::with_rng(first, second, ratio, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(first: T, second: T, ratio: f64, rng: ChaCha8Rng) -> Self {
        let ratio = if ratio.is_nan() {
            0.0
        } else {
            ratio.clamp(0.0, 1.0)
        };
        Self {
            first,
            second,
            ratio,
            rng,
        }
    }

    /// Ratio after clamping to `[0, 1]`.
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    pub fn next(&mut self) -> T {
        let roll: f64 = self.rng.random();
        if roll < self.ratio {
            self.first.clone()
        } else {
            self.second.clone()
        }
    }
}
