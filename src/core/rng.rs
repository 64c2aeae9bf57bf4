//! Seeded shuffling.
//!
//! A table's deck order is a pure function of its seed and how far the
//! stream had advanced, so recording a `GameRngState` before shuffling is
//! enough to rebuild the exact same ledger later.
//!
//! Shuffles are not cryptographically hardened.
//!
//! ```
//! use rust_dealer::core::GameRng;
//!
//! let mut left: Vec<u32> = (0..10).collect();
//! let mut right = left.clone();
//! GameRng::new(7).shuffle(&mut left);
//! GameRng::new(7).shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fisher-Yates in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.stream);
    }

    /// Where the stream is now.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Resume a stream exactly where `state` was taken.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(state.seed);
        stream.set_word_pos(state.word_pos);
        Self {
            stream,
            seed: state.seed,
        }
    }
}

/// Recorded position of a `GameRng`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    /// ChaCha word counter.
    pub word_pos: u128,
}
