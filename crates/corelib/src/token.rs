//! Token abstraction for ring placement.
//!
//! Tokens represent positions on the hash ring and must be comparable,
//! hashable, and thread-safe. The hash behind [`Murmur3Token`] is fixed:
//! the same key bytes always map to the same token, across processes and
//! restarts, so replica placement is stable as long as topology is.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

/// Minimal token trait for the hash ring.
///
/// Tokens are immutable, comparable positions. Implementations must be
/// thread-safe and cheap to compare/hash.
pub trait Token: Clone + Ord + Hash + Send + Sync + Debug + 'static {
    /// Minimum token value (start of ring).
    fn zero() -> Self;
    /// Maximum token value (end of ring).
    fn max() -> Self;
    /// True if this token is the minimum.
    fn is_zero(&self) -> bool;
    /// True if this token is the maximum.
    fn is_max(&self) -> bool;
    /// Clockwise distance from `self` to `other` on the ring.
    fn distance_to(&self, other: &Self) -> Self;
}

/// Murmur3-style token using u64 representation.
///
/// Keyed with a fixed (all-zero) SipHash-1-3 key so token values are
/// reproducible everywhere the crate runs.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Murmur3Token(pub u64);

impl Token for Murmur3Token {
    fn zero() -> Self {
        Murmur3Token(0)
    }

    fn max() -> Self {
        Murmur3Token(u64::MAX)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }

    fn is_max(&self) -> bool {
        self.0 == u64::MAX
    }

    fn distance_to(&self, other: &Self) -> Self {
        if other.0 >= self.0 {
            Murmur3Token(other.0 - self.0)
        } else {
            Murmur3Token((u64::MAX - self.0) + other.0 + 1)
        }
    }
}

impl Murmur3Token {
    /// Creates a token from a byte slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hasher = SipHasher13::new();
        data.hash(&mut hasher);
        Murmur3Token(hasher.finish())
    }

    /// Creates a token from a string key.
    pub fn from_key(key: &str) -> Self {
        Self::from_bytes(key.as_bytes())
    }
}
