//! Deterministic sequencer and seed-derivation helpers.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Scale factor mapping the top 53 bits of a `u64` into [0, 1).
const UNIT_SCALE: f64 = 1.0 / (1u64 << 53) as f64;

/// Seed accepted by the project configuration.
///
/// A numeric seed is used verbatim. A text seed is reduced to `u64` with
/// SipHash-1-3 configured with fixed zero keys; this rule is stable across
/// platforms and is the only sanctioned way to derive numeric seeds from
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    /// Direct numeric seed.
    Number(u64),
    /// Text label hashed into a numeric seed.
    Text(String),
}

impl Seed {
    /// Reduces the seed to the `u64` fed into the sequencer.
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(value) => *value,
            Seed::Text(label) => derive_text_seed(label),
        }
    }
}

/// Derives the deterministic numeric seed for a text label.
pub fn derive_text_seed(label: &str) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write(label.as_bytes());
    hasher.finish()
}

/// The single deterministic random stream consumed by every component.
///
/// The generator is pinned to ChaCha12 so that "same seed, same output"
/// names a versioned algorithm instead of depending on whichever generator
/// `StdRng` aliases in a given `rand` release. Draws happen in exactly one
/// global order; the sequencer has a single consumer and no thread-safety
/// requirement.
#[derive(Debug, Clone)]
pub struct Sequencer {
    rng: ChaCha12Rng,
    draws: u64,
}

impl Sequencer {
    /// Creates a sequencer from a reduced numeric seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha12Rng::seed_from_u64(seed),
            draws: 0,
        }
    }

    /// Returns the next float in [0, 1).
    ///
    /// Takes the top 53 bits of the generator output, so every value is an
    /// exactly representable multiple of 2^-53.
    pub fn next(&mut self) -> f64 {
        self.draws += 1;
        (self.rng.next_u64() >> 11) as f64 * UNIT_SCALE
    }

    /// Canonical `floor(next() * n)` index draw used by every component.
    pub fn draw_index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0, "draw_index requires a non-empty range");
        (self.next() * n as f64) as usize
    }

    /// Number of values drawn so far (diagnostics and consumption audits).
    pub fn draws(&self) -> u64 {
        self.draws
    }
}
