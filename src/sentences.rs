use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};
use std::fmt;

/// Fixed corpus the test draws its target text from.
pub const SENTENCES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog.",
    "Java is a high-level programming language.",
    "Practice makes perfect.",
    "Typing fast is a useful skill.",
    "Never stop learning and improving.",
];

/// A target sentence. Immutable once selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence(&'static str);

impl Sentence {
    pub fn new(text: &'static str) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Length in characters, not bytes.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Picks sentences uniformly at random from [`SENTENCES`].
#[derive(Debug)]
pub struct SentenceProvider<R: Rng = ThreadRng> {
    rng: R,
}

impl SentenceProvider<ThreadRng> {
    pub fn new() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl Default for SentenceProvider<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl SentenceProvider<StdRng> {
    /// Reproducible provider for tests
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SentenceProvider<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn next(&mut self) -> Sentence {
        let idx = self.rng.gen_range(0..SENTENCES.len());
        Sentence(SENTENCES[idx])
    }
}
