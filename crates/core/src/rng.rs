//! Deterministic random number generation
//!
//! A small linear congruential generator so the whole resolution pipeline
//! is reproducible from a single seed. Refill, board generation, and
//! luck draws all consume the same stream, which makes cascade sequences
//! replayable in tests and demos.

/// Simple linear congruential generator (Numerical Recipes constants)
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 32-bit value
    pub fn next_u32(&mut self) -> u32 {
        self.state = self
            .state
            .wrapping_mul(1664525)
            .wrapping_add(1013904223);
        (self.state >> 16) as u32
    }

    /// Uniform value in `[0, max)`; returns 0 when `max == 0`
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Uniform float in `[0, 1)`
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() as f32) / (u32::MAX as f32 + 1.0)
    }

    /// Bernoulli draw: true with probability `p` (clamped to `[0, 1]`)
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}
