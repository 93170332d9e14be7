//! Random sources for shuffle selection
//!
//! The sequencing engine never touches a global RNG directly: every pick goes
//! through a [`RandomSource`] so hosts can seed it and tests can script it.

use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use std::collections::VecDeque;

/// Source of uniformly distributed indices
pub trait RandomSource {
    /// Pick an index in `0..len`
    ///
    /// Callers never pass `len == 0`.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG, the default for real sessions
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        thread_rng().gen_range(0..len)
    }
}

/// Seeded RNG for reproducible shuffles
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    /// Create a source from a fixed seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }
}

/// Scripted indices, replayed in order
///
/// Each scripted value is reduced modulo `len`; once the script runs out the
/// source keeps answering `0`.
#[derive(Debug, Clone, Default)]
pub struct SequenceRandom {
    script: VecDeque<usize>,
}

impl SequenceRandom {
    /// Create a source that replays `script`
    pub fn new(script: impl IntoIterator<Item = usize>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Number of scripted picks not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&mut self, len: usize) -> usize {
        self.script.pop_front().map_or(0, |i| i % len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}
