//! RNG module - uniform random piece generation
//!
//! Each draw picks one of the seven kinds uniformly and independently. There
//! is no bag: repeats and droughts are possible. A fixed-length lookahead
//! queue sits in front of the generator so upcoming pieces can be shown.
//!
//! The generator is a simple LCG so a seed reproduces the whole game.

use std::collections::VecDeque;

use crate::types::PieceKind;

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

    /// Generate random value in range [0, max). Returns 0 when `max` is 0.
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // The low bits of an LCG are weak; use the high half.
        (self.next_u32() >> 16) % max
    }

    /// Uniformly random piece kind.
    pub fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

/// Fixed-length queue of upcoming pieces
#[derive(Debug, Clone)]
pub struct PieceQueue {
    upcoming: VecDeque<PieceKind>,
    rng: SimpleRng,
    seed: u32,
}

impl PieceQueue {
    /// Create a queue holding `len` upcoming pieces (at least one).
    pub fn new(seed: u32, len: usize) -> Self {
        let len = len.max(1);
        let mut rng = SimpleRng::new(seed);
        let upcoming = (0..len).map(|_| rng.next_kind()).collect();
        Self {
            upcoming,
            rng,
            seed,
        }
    }

    /// Take the head of the queue and append a fresh random piece to the tail.
    pub fn draw(&mut self) -> PieceKind {
        let fresh = self.rng.next_kind();
        self.upcoming.push_back(fresh);
        // The queue always holds at least two entries after the push.
        self.upcoming.pop_front().unwrap_or(fresh)
    }

    /// Next piece to be drawn
    pub fn peek(&self) -> Option<PieceKind> {
        self.upcoming.front().copied()
    }

    /// Upcoming pieces, next first.
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.upcoming.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.upcoming.len()
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty()
    }

    /// Seed the queue was created with (for restarting with the same sequence)
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1, crate::types::NEXT_QUEUE_LEN)
    }
}
