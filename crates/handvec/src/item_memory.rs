//! Deterministic item memory for (feature, bin) symbols.
//!
//! Each `(feature_index, bin_index)` pair owns one random bipolar
//! hypervector, drawn lazily on first reference from an LCG seeded by the
//! pair itself. The vector for a key therefore depends only on the key and
//! the dimension — never on draw order, other keys, or any recognizer-wide
//! state — so two instances built with the same dimension agree bit for
//! bit on every entry. Once drawn, an entry is immutable for the life of
//! the memory.
//!
//! At the default configuration the table tops out at `48 · 16 = 768`
//! vectors; entries only materialize for bins a pose actually visits.

use std::collections::HashMap;

use crate::rng::SeededRng;
use crate::Hypervector;

/// Offset folded into every per-key seed.
const SEED_OFFSET: u32 = 12_345;
/// Stride separating feature indices in seed space.
const FEATURE_STRIDE: u32 = 1_000;

/// Lazy table of deterministic bipolar vectors keyed by (feature, bin).
#[derive(Clone, Debug)]
pub struct ItemMemory {
    dim: usize,
    entries: HashMap<(u16, u16), Hypervector>,
}

impl ItemMemory {
    /// Create an empty item memory for vectors of length `dim`.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            entries: HashMap::new(),
        }
    }

    /// Vector length of every entry.
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Number of materialized entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether any entry has been materialized yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all materialized entries, keeping the dimension.
    ///
    /// Subsequent lookups re-derive identical vectors, so this only
    /// trades memory for recomputation.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Fetch the vector for `(feature, bin)`, drawing it on first use.
    pub fn get(&mut self, feature: usize, bin: usize) -> &Hypervector {
        let key = (feature as u16, bin as u16);
        let dim = self.dim;
        self.entries
            .entry(key)
            .or_insert_with(|| Self::derive(dim, feature, bin))
    }

    /// Draw the vector for a key without consulting the table.
    fn derive(dim: usize, feature: usize, bin: usize) -> Hypervector {
        let seed = (feature as u32)
            .wrapping_mul(FEATURE_STRIDE)
            .wrapping_add(bin as u32)
            .wrapping_add(SEED_OFFSET);
        SeededRng::new(seed).bipolar_vector(dim)
    }
}
