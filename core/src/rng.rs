//! Deterministic random number generation.
//!
//! RULE: Nothing in the desk may call any platform RNG.
//! Synthetic data is drawn from DeskRng streams derived from a
//! single seed, so a fallback roster is reproducible from
//! (seed, stream) alone.
//!
//! Each stream is seeded from (seed XOR stream_index * golden ratio).
//! Adding a new stream never changes the values an existing one draws.

use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for one stream of synthetic data.
pub struct DeskRng {
    pub stream: RngStream,
    inner:      Pcg64Mcg,
}

impl DeskRng {
    pub fn new(seed: u64, stream: RngStream) -> Self {
        let derived_seed = seed ^ (stream as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15);
        Self {
            stream,
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        let bits = self.inner.next_u64();
        (bits >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }

    /// Roll a u64 in [0, n). Returns 0 when n is 0.
    pub fn next_u64_below(&mut self, n: u64) -> u64 {
        if n == 0 {
            return 0;
        }
        self.inner.next_u64() % n
    }

    /// Roll an integer in [lo, hi] inclusive.
    pub fn int_between(&mut self, lo: u64, hi: u64) -> u64 {
        if hi <= lo {
            return lo;
        }
        lo + self.next_u64_below(hi - lo + 1)
    }

    /// Roll a float in [lo, hi).
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Pick one element uniformly. None only for an empty slice.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        let idx = self.next_u64_below(items.len() as u64) as usize;
        items.get(idx)
    }
}

/// Stable stream assignments.
/// NEVER reorder or remove entries. Only append.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Roster   = 0,
    Names    = 1,
}

impl RngStream {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Roster   => "roster",
            Self::Names    => "names",
        }
    }
}
