//! Xorshift32 PRNG.
//!
//! Algorithm: x ^= x << 13; x ^= x >> 17; x ^= x << 5;
//! The whole simulation draws from one seeded stream, so a run is fully
//! reproducible from its `u32` seed.

#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        // Must be non-zero; substitute a default if 0 is provided.
        let state = if seed == 0 { 0xDEADBEEF } else { seed };
        Self { state }
    }

    pub fn get_state(&self) -> u32 {
        self.state
    }

    /// Generate next random u32.
    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Random f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        self.next() as f64 / 4_294_967_296.0
    }

    /// Random f64 in [min, max).
    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    /// Bernoulli trial with the given probability.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }
}
