//! Seeded pseudo-random number generation for reproducible vector draws.
//!
//! A 32-bit linear congruential generator with the Numerical Recipes
//! constants. Deliberately minimal: the item memory only needs cheap,
//! cross-language bit-identical draws of near-orthogonal bipolar vectors,
//! not cryptographic quality. Any port that reproduces the same
//! `(multiplier, increment)` pair in 32-bit modular arithmetic produces
//! identical vectors.

/// LCG multiplier (Numerical Recipes).
const MULTIPLIER: u32 = 1_664_525;
/// LCG increment (Numerical Recipes).
const INCREMENT: u32 = 1_013_904_223;

/// Seeded 32-bit LCG.
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from a seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Advance the state and return it: `s ← s·1664525 + 1013904223 mod 2^32`.
    pub fn next_state(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(MULTIPLIER)
            .wrapping_add(INCREMENT);
        self.state
    }

    /// Uniform draw in `[0, 1)`.
    pub fn next_unit(&mut self) -> f64 {
        self.next_state() as f64 / 4_294_967_296.0
    }

    /// Random bipolar value: `+1` when the unit draw is >= 0.5, else `-1`.
    pub fn next_bipolar(&mut self) -> i8 {
        if self.next_unit() >= 0.5 {
            1
        } else {
            -1
        }
    }

    /// Random bipolar vector of length `n`.
    pub fn bipolar_vector(&mut self, n: usize) -> Vec<i8> {
        (0..n).map(|_| self.next_bipolar()).collect()
    }
}
