//! RNG module - deterministic randomness for generation and refill
//!
//! A small LCG keeps every game reproducible from its seed, which the tests and the
//! `MATCH3_SEED` setting rely on. Draw order is part of the contract: the generator and
//! the refill both roll the blocker chance first and the color second.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG have very short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Roll a percentage: true with probability `percent / 100`
    pub fn chance_percent(&mut self, percent: u8) -> bool {
        self.next_range(100) < percent as u32
    }

    /// Pick a uniformly random element of `items`
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx).copied()
    }

    /// Current RNG state (seeding a new RNG with it continues the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
