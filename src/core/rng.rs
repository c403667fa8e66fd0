//! Seeded randomness for player ids.
//!
//! Ids only need to be unique and, in tests, reproducible. `IdRng` wraps
//! ChaCha8 so a seed fixes the whole id sequence, and its position can be
//! checkpointed so a factory resumed later keeps handing out fresh ids.
//!
//! ```
//! use rust_darts::core::IdRng;
//!
//! let mut a = IdRng::new(7);
//! let mut b = IdRng::new(7);
//! assert_eq!(a.next_salt(), b.next_salt());
//! assert!(a.next_salt() <= IdRng::SALT_MASK);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// ChaCha8 stream that yields id salts.
#[derive(Clone, Debug)]
pub struct IdRng {
    stream: ChaCha8Rng,
    seed: u64,
}

impl IdRng {
    /// Salts are 48 bits, printed as 12 hex digits.
    pub const SALT_MASK: u64 = 0xffff_ffff_ffff;

    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            stream: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seeded from the thread RNG; used when ids need not be reproducible.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Next 48-bit salt.
    pub fn next_salt(&mut self) -> u64 {
        self.stream.gen::<u64>() & Self::SALT_MASK
    }

    /// Position in the stream, for `resume`.
    #[must_use]
    pub fn checkpoint(&self) -> IdRngState {
        IdRngState {
            seed: self.seed,
            word_pos: self.stream.get_word_pos(),
        }
    }

    /// Continue a stream from a checkpoint.
    #[must_use]
    pub fn resume(checkpoint: &IdRngState) -> Self {
        let mut stream = ChaCha8Rng::seed_from_u64(checkpoint.seed);
        stream.set_word_pos(checkpoint.word_pos);
        Self {
            stream,
            seed: checkpoint.seed,
        }
    }
}

/// Serializable position of an `IdRng`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRngState {
    pub seed: u64,
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_salts() {
        let mut left = IdRng::new(42);
        let mut right = IdRng::new(42);
        let a: Vec<_> = (0..32).map(|_| left.next_salt()).collect();
        let b: Vec<_> = (0..32).map(|_| right.next_salt()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeds_diverge() {
        let mut left = IdRng::new(1);
        let mut right = IdRng::new(2);
        assert_ne!(
            (0..4).map(|_| left.next_salt()).collect::<Vec<_>>(),
            (0..4).map(|_| right.next_salt()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_salts_fit_mask() {
        let mut rng = IdRng::new(9);
        assert!((0..256).all(|_| rng.next_salt() <= IdRng::SALT_MASK));
    }

    #[test]
    fn test_resume_continues_stream() {
        let mut rng = IdRng::new(42);
        for _ in 0..5 {
            rng.next_salt();
        }

        let checkpoint = rng.checkpoint();
        let ahead: Vec<_> = (0..3).map(|_| rng.next_salt()).collect();

        let mut resumed = IdRng::resume(&checkpoint);
        let replay: Vec<_> = (0..3).map(|_| resumed.next_salt()).collect();
        assert_eq!(ahead, replay);
        assert_eq!(resumed.seed(), 42);
    }
}
