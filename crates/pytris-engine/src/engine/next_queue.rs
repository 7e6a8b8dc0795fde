use std::{collections::VecDeque, fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{PieceKind, SeedParseError};

/// Fixed-length lookahead of upcoming piece kinds.
///
/// Every kind is drawn uniformly at random among the seven kinds. Popping the
/// front immediately appends a newly drawn kind, so the queue always holds
/// exactly `len` entries.
///
/// # Example
///
/// ```
/// use pytris_engine::{NextQueue, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdef0123456789abcdef".parse()?;
/// let mut queue = NextQueue::with_seed(4, seed);
///
/// let upcoming: Vec<_> = queue.iter().collect();
/// assert_eq!(queue.pop_next(), upcoming[0]);
/// assert_eq!(queue.len(), 4);
/// # Ok::<(), pytris_engine::SeedParseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct NextQueue {
    rng: Pcg32,
    queue: VecDeque<PieceKind>,
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the piece generator. The same seed always produces the same
/// sequence of pieces, which keeps tests and bug reports reproducible. It is
/// written as 32 hexadecimal digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

impl FromStr for PieceSeed {
    type Err = SeedParseError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(SeedParseError::InvalidLength { len: hex_str.len() });
        }
        let invalid_digit = || SeedParseError::InvalidDigit {
            seed: hex_str.to_owned(),
        };
        if !hex_str.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid_digit());
        }
        let num = u128::from_str_radix(hex_str, 16).map_err(|_| invalid_digit())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl std::fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl NextQueue {
    /// Creates a queue of `len` kinds from a random seed.
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self::with_seed(len, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(len: usize, seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let queue = (0..len).map(|_| rng.random()).collect();
        Self { rng, queue }
    }

    /// Removes the front kind and appends a freshly drawn one.
    ///
    /// A zero-length queue hands out the freshly drawn kind directly.
    pub fn pop_next(&mut self) -> PieceKind {
        self.queue.push_back(self.rng.random());
        self.queue
            .pop_front()
            .expect("queue should hold at least the kind just drawn")
    }

    /// Iterates over the upcoming kinds, soonest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = PieceKind> + '_ {
        self.queue.iter().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    #[test]
    fn test_length_is_fixed() {
        let mut queue = NextQueue::with_seed(4, SEED);
        assert_eq!(queue.len(), 4);
        for _ in 0..50 {
            queue.pop_next();
            assert_eq!(queue.len(), 4);
        }
    }

    #[test]
    fn test_pop_returns_front_and_shifts() {
        let mut queue = NextQueue::with_seed(4, SEED);
        let before: Vec<_> = queue.iter().collect();
        let popped = queue.pop_next();
        let after: Vec<_> = queue.iter().collect();
        assert_eq!(popped, before[0]);
        assert_eq!(after[..3], before[1..]);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let mut queue1 = NextQueue::with_seed(4, SEED);
        let mut queue2 = NextQueue::with_seed(4, SEED);
        for _ in 0..20 {
            assert_eq!(queue1.pop_next(), queue2.pop_next());
        }
    }

    #[test]
    fn test_zero_length_queue_still_hands_out_pieces() {
        let mut queue = NextQueue::with_seed(0, SEED);
        assert!(queue.is_empty());
        let _ = queue.pop_next();
        assert!(queue.is_empty());
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_known_value_sequential_bytes() {
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            let serialized = serde_json::to_string(&seed).unwrap();
            assert_eq!(serialized, "\"0123456789abcdeffedcba9876543210\"");

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_parse_accepts_uppercase() {
            let seed: PieceSeed = "0123456789ABCDEFFEDCBA9876543210".parse().unwrap();
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(
                "0123".parse::<PieceSeed>(),
                Err(SeedParseError::InvalidLength { len: 4 })
            );
            assert!(matches!(
                "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
                Err(SeedParseError::InvalidDigit { .. })
            ));
            assert!(matches!(
                "+123456789abcdef0123456789abcdef".parse::<PieceSeed>(),
                Err(SeedParseError::InvalidDigit { .. })
            ));
            let err = serde_json::from_str::<PieceSeed>("\"\"").unwrap_err();
            assert!(err.to_string().contains("32 hex digits"));
        }

        #[test]
        fn test_same_seed_after_roundtrip_generates_same_pieces() {
            let original: PieceSeed = rand::rng().random();
            let restored: PieceSeed = original.to_string().parse().unwrap();
            let mut queue1 = NextQueue::with_seed(4, original);
            let mut queue2 = NextQueue::with_seed(4, restored);
            for _ in 0..20 {
                assert_eq!(queue1.pop_next(), queue2.pop_next());
            }
        }
    }
}
