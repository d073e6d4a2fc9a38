//! Pipeline-wide random seed.

use std::fmt;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Seed shared by every image request of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// Draw a seed from an RNG seeded with the current wall-clock time.
    pub fn generate() -> Self {
        // Timestamps outside the i64 nanosecond range (after 2262) fall back to
        // microsecond resolution.
        let now = Utc::now();
        let nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));
        Self::from_timestamp_nanos(nanos)
    }

    /// Deterministic seed derivation for a given timestamp.
    pub fn from_timestamp_nanos(nanos: i64) -> Self {
        let mut rng = StdRng::seed_from_u64(nanos as u64);
        Self(rng.next_u32())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Self(value)
    }
}
