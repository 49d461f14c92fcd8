//! Receiver selection.
//!
//! The service never calls an RNG directly; it asks a [`ReceiverPicker`].
//! Production uses [`RandomPicker`], tests inject a [`SeededPicker`] so a
//! run can be replayed.

use std::fmt::Debug;
use std::sync::{Mutex, PoisonError};

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Chooses one receiver out of the currently available candidates.
pub trait ReceiverPicker: Send + Sync + Debug {
    /// Returns one element of `candidates`, uniformly at random, or
    /// `None` when `candidates` is empty.
    fn pick(&self, candidates: &[String]) -> Option<String>;
}

/// Uniform choice using the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPicker;

impl ReceiverPicker for RandomPicker {
    fn pick(&self, candidates: &[String]) -> Option<String> {
        candidates.choose(&mut rand::thread_rng()).cloned()
    }
}

/// Uniform choice from a seeded, reproducible RNG.
#[derive(Debug)]
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    /// Creates a picker whose sequence of choices is fixed by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReceiverPicker for SeededPicker {
    fn pick(&self, candidates: &[String]) -> Option<String> {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        candidates.choose(&mut *rng).cloned()
    }
}
