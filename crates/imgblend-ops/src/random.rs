//! Random draws for Dissolve.
//!
//! Dissolve needs one uniform draw per pixel. The source of those draws is
//! injected, so callers can seed it (or script it in tests) instead of
//! reaching for process-wide randomness.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource: Send {
    /// Returns the next draw.
    fn next_unit(&mut self) -> f64;
}

impl<R> RandomSource for R
where
    R: RngCore + Send,
{
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.r#gen::<f64>()
    }
}

/// A [`StdRng`] seeded from operating-system entropy.
pub fn entropy_source() -> StdRng {
    StdRng::from_entropy()
}

/// A [`StdRng`] seeded for reproducible output.
pub fn seeded_source(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
