use rand::{rngs::StdRng, Rng, SeedableRng};
use ticker_config::MAX_WALK_STEP;
use ticker_core::{FetchError, Sample, SampleSource};

/// Offline demo feed: each fetch moves the price by up to `step` either way.
#[derive(Debug, Clone)]
pub struct RandomWalk {
    price: Sample,
    step:  f64,
    rng:   StdRng,
}

impl RandomWalk {
    pub fn new(start: Sample, step: f64) -> Self {
        Self::with_rng(start, step, StdRng::from_entropy())
    }

    /// Deterministic walk for tests and reproducible demos.
    pub fn with_seed(start: Sample, step: f64, seed: u64) -> Self {
        Self::with_rng(start, step, StdRng::seed_from_u64(seed))
    }

    /// A step that is NaN or too wide to sample from degrades to a flat walk.
    fn with_rng(start: Sample, step: f64, rng: StdRng) -> Self {
        let step = step.abs();
        Self {
            price: if start.is_finite() { start.max(0.0) } else { 0.0 },
            step:  if step <= MAX_WALK_STEP { step } else { 0.0 },
            rng,
        }
    }
}

impl SampleSource for RandomWalk {
    async fn fetch(&mut self) -> Result<Sample, FetchError> {
        let delta = self.rng.gen_range(-self.step..=self.step);
        self.price = (self.price + delta).max(0.0);
        Ok(self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn moves_at_most_one_step() {
        let mut walk = RandomWalk::with_seed(100.0, 2.5, 7);
        let mut prev = 100.0;
        for _ in 0..50 {
            let next = walk.fetch().await.unwrap();
            assert!((next - prev).abs() <= 2.5 + 1e-9);
            prev = next;
        }
    }

    #[tokio::test]
    async fn never_goes_negative() {
        let mut walk = RandomWalk::with_seed(0.0, 10.0, 1);
        for _ in 0..50 {
            assert!(walk.fetch().await.unwrap() >= 0.0);
        }
    }

    #[tokio::test]
    async fn unusable_step_gives_flat_walk() {
        for step in [f64::INFINITY, f64::NAN, f64::MAX] {
            let mut walk = RandomWalk::with_seed(100.0, step, 3);
            assert_eq!(walk.fetch().await.unwrap(), 100.0);
        }
    }

    #[tokio::test]
    async fn same_seed_same_walk() {
        let mut a = RandomWalk::with_seed(50.0, 1.0, 42);
        let mut b = RandomWalk::with_seed(50.0, 1.0, 42);
        for _ in 0..10 {
            assert_eq!(a.fetch().await.unwrap(), b.fetch().await.unwrap());
        }
    }
}
