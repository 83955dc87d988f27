//! RNG module - seedable tile generation
//!
//! A small LCG drives every random decision on the board, so a seed fully
//! determines the initial fill and every refill.

use crate::types::TileKind;

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
    /// Taken from the high half of the state.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Uniform tile kind in `[0, kinds)`
    pub fn next_kind(&mut self, kinds: TileKind) -> TileKind {
        self.next_range(kinds as u32) as TileKind
    }

    /// Uniform tile kind, stepping circularly past excluded kinds.
    ///
    /// Panics when `kinds` is zero or every kind is excluded.
    pub fn next_kind_excluding(&mut self, kinds: TileKind, excluding: [Option<TileKind>; 2]) -> TileKind {
        assert!(kinds > 0, "cannot draw from zero tile kinds");
        let mut kind = self.next_kind(kinds);
        for _ in 0..kinds {
            if !excluding.contains(&Some(kind)) {
                return kind;
            }
            kind = (kind + 1) % kinds;
        }
        panic!("all {kinds} tile kinds are excluded");
    }

    /// Current internal state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
