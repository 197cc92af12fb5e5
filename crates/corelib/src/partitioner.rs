//! Partitioner abstraction.
//!
//! A partitioner converts partition keys into tokens for placement on the
//! hash ring. Partitioners are stateless and thread-safe, allowing
//! concurrent token generation without synchronization overhead.

use crate::token::{Murmur3Token, Token};

/// A partitioner converts keys into tokens for placement on the hash ring.
pub trait Partitioner: Send + Sync + 'static {
    /// The token type produced by this partitioner.
    type TokenType: Token;

    /// Converts a key into a token.
    fn partition(&self, key: &[u8]) -> Self::TokenType;

    /// Returns the minimum token value for this partitioner.
    fn min_token(&self) -> Self::TokenType;

    /// Returns the maximum token value for this partitioner.
    fn max_token(&self) -> Self::TokenType;

    /// Returns the name of this partitioner.
    fn name(&self) -> &'static str;
}

/// The default partitioner: hashes raw key bytes to a [`Murmur3Token`].
#[derive(Clone, Debug, Default)]
pub struct Murmur3Partitioner;

impl Partitioner for Murmur3Partitioner {
    type TokenType = Murmur3Token;

    fn partition(&self, key: &[u8]) -> Self::TokenType {
        Murmur3Token::from_bytes(key)
    }

    fn min_token(&self) -> Self::TokenType {
        Murmur3Token::zero()
    }

    fn max_token(&self) -> Self::TokenType {
        <Murmur3Token as Token>::max()
    }

    fn name(&self) -> &'static str {
        "Murmur3Partitioner"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_matches_token_hash() {
        let p = Murmur3Partitioner;
        assert_eq!(p.partition(b"key"), Murmur3Token::from_bytes(b"key"));
        assert_eq!(p.name(), "Murmur3Partitioner");
    }
}
