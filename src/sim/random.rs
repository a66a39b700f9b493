//! Random source seam
//!
//! Placement and variant choice draw from an injected source so a fixed seed
//! replays the same session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random draws used by the spawner
pub trait RandomSource {
    /// Uniform integer in `[lo, hi]` (inclusive); returns `lo` if `hi < lo`
    fn int_in(&mut self, lo: i32, hi: i32) -> i32;
    /// Uniform real in `[lo, hi]`; returns `lo` if `hi < lo`.
    /// Non-finite bounds never panic.
    fn real_in(&mut self, lo: f32, hi: f32) -> f32;
}

/// Seeded PCG stream owned by the world
#[derive(Debug, Clone)]
pub struct SessionRng {
    rng: Pcg32,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SessionRng {
    fn int_in(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.rng.random_range(lo..=hi)
    }

    fn real_in(&mut self, lo: f32, hi: f32) -> f32 {
        if !lo.is_finite() || !hi.is_finite() {
            return if lo.is_finite() { lo } else { 0.0 };
        }
        if !(hi > lo) {
            return lo;
        }
        // Span overflows f32; draw a fraction instead
        if !(hi - lo).is_finite() {
            let t: f32 = self.rng.random_range(0.0..=1.0);
            return lo * (1.0 - t) + hi * t;
        }
        self.rng.random_range(lo..=hi)
    }
}
