//! RNG module - seedable random sources and 7-bag piece generation
//!
//! Implements the "7-bag" randomization algorithm used in modern Tetris.
//! Each bag contains one of each piece (I, O, T, S, Z, J, L), shuffled.
//! Draws from the bag until empty, then generates a new bag.
//!
//! Randomness is always injected: every consumer owns an explicit
//! [`RandomSource`] instance, so a match is replayable from its seeds.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// A seedable source of random numbers.
///
/// Implemented by [`SimpleRng`]; tests may supply scripted sources.
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, max). Returns 0 when `max == 0`.
    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.next_u32() % max
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

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
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // Low LCG bits have short periods; scale from the high bits instead.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// 7-bag piece generator
#[derive(Debug, Clone)]
pub struct Randomizer<R = SimpleRng> {
    /// Remaining pieces of the current bag; drawn from the back
    bag: ArrayVec<PieceKind, 7>,
    /// RNG for shuffling
    rng: R,
}

impl Randomizer<SimpleRng> {
    /// Create a randomizer backed by a [`SimpleRng`] with the given seed
    pub fn with_seed(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Randomizer<R> {
    /// Create a randomizer with an empty bag; the first draw fills it.
    pub fn new(rng: R) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng,
        }
    }

    /// Generate a new shuffled bag
    fn refill_bag(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(self.bag.as_mut_slice());
    }

    /// Draw the next piece, refilling the bag first when it is empty
    pub fn next(&mut self) -> PieceKind {
        loop {
            if let Some(kind) = self.bag.pop() {
                return kind;
            }
            self.refill_bag();
        }
    }

    /// Pieces left in the current bag
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}

impl<R: RandomSource + Clone> Randomizer<R> {
    /// Peek at the next `N` pieces without consuming them.
    ///
    /// Draws from a clone, so the preview always matches the following draws.
    pub fn preview<const N: usize>(&self) -> [PieceKind; N] {
        let mut ahead = self.clone();
        [(); N].map(|_| ahead.next())
    }
}

impl Default for Randomizer<SimpleRng> {
    fn default() -> Self {
        Self::with_seed(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

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
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..20u32 {
            for _ in 0..50 {
                assert!(rng.next_range(max) < max);
            }
        }
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_randomizer_starts_with_empty_bag() {
        let randomizer = Randomizer::with_seed(1);
        assert_eq!(randomizer.remaining(), 0);
    }

    #[test]
    fn test_randomizer_draws_all_seven() {
        let mut randomizer = Randomizer::with_seed(1);

        let mut drawn: Vec<PieceKind> = (0..7).map(|_| randomizer.next()).collect();
        drawn.sort();
        let mut all = PieceKind::ALL.to_vec();
        all.sort();
        assert_eq!(drawn, all);
        assert_eq!(randomizer.remaining(), 0);
    }

    #[test]
    fn test_randomizer_refills_after_seven() {
        let mut randomizer = Randomizer::with_seed(99);
        for _ in 0..7 {
            randomizer.next();
        }
        randomizer.next();
        assert_eq!(randomizer.remaining(), 6);
    }

    #[test]
    fn test_preview_matches_draws() {
        let mut randomizer = Randomizer::with_seed(4242);
        randomizer.next();
        randomizer.next();

        // Spans the bag boundary.
        let preview: [PieceKind; 9] = randomizer.preview();
        for expected in preview {
            assert_eq!(randomizer.next(), expected);
        }
    }
}
