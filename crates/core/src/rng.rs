//! RNG module - deterministic random source for piece selection
//!
//! Pieces are drawn uniformly from the seven templates (no bag). The generator
//! is a small LCG so a seed fully determines a session's piece sequence,
//! which keeps tests and replays reproducible.

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
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
    /// Uses the high bits (multiply-shift) since the low bits of an LCG with a
    /// power-of-two modulus have short periods. `max == 0` yields 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_different_seeds() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(54321);

        assert_ne!(rng1.next_u32(), rng2.next_u32());
    }

    #[test]
    fn test_zero_seed_is_not_stuck() {
        let mut rng = SimpleRng::new(0);
        let a = rng.next_u32();
        let b = rng.next_u32();
        assert_ne!(a, b);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(7) < 7);
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_next_range_covers_all_values_roughly_uniformly() {
        let mut rng = SimpleRng::new(2024);
        let mut counts = [0u32; 7];
        let draws = 70_000;
        for _ in 0..draws {
            counts[rng.next_range(7) as usize] += 1;
        }
        for (i, &count) in counts.iter().enumerate() {
            // Expected 10_000 per bucket; allow a generous band.
            assert!(
                (9_000..=11_000).contains(&count),
                "bucket {} drew {} times",
                i,
                count
            );
        }
    }
}
