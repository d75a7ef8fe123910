//! Option shuffling with an injectable source of randomness.
//!
//! Everything random in a session (option order, success image) draws from a
//! [`RandomSource`], so tests can replay exact sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::model::{OptionKey, Question, RawQuestion};

/// Source of uniformly distributed indices.
pub trait RandomSource: Send {
    /// Returns an index in `0..bound`. A `bound` of 0 or 1 always yields 0.
    fn next_index(&mut self, bound: usize) -> usize;
}

/// Draws from rand's thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        rand::rng().random_range(0..bound)
    }
}

/// Reproducible generator seeded from a `u64`.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        self.rng.random_range(0..bound)
    }
}

/// Replays a fixed script of indices, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound. An empty
/// script always yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    script: Vec<usize>,
    position: usize,
}

impl ScriptedRandom {
    pub fn new(script: &[usize]) -> Self {
        Self {
            script: script.to_vec(),
            position: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedRandom {
    fn next_index(&mut self, bound: usize) -> usize {
        if self.script.is_empty() || bound <= 1 {
            self.position += 1;
            return 0;
        }
        let value = self.script[self.position % self.script.len()];
        self.position += 1;
        value % bound
    }
}

/// In-place Fisher–Yates shuffle, walking from the last slot down.
pub fn shuffle<T>(items: &mut [T], rng: &mut dyn RandomSource) {
    for i in (1..items.len()).rev() {
        let j = rng.next_index(i + 1);
        items.swap(i, j);
    }
}

/// Turn a service question into a presentable one with shuffled options.
///
/// The value listed under `a` is kept as the correct option before the
/// three values are permuted and re-keyed `a`, `b`, `c`.
pub fn randomize_question(raw: RawQuestion, rng: &mut dyn RandomSource) -> Question {
    let mut values = raw.options.into_values();
    let correct_option = values[0].clone();
    shuffle(&mut values, rng);

    Question {
        word: raw.word,
        options: OptionKey::ALL.into_iter().zip(values).collect(),
        correct_option,
    }
}

/// Randomize every question, keeping the question order.
pub fn randomize_questions(raws: Vec<RawQuestion>, rng: &mut dyn RandomSource) -> Vec<Question> {
    raws.into_iter()
        .map(|raw| randomize_question(raw, &mut *rng))
        .collect()
}
