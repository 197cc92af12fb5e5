//! Error types for replica placement.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// Replication factors below 1 make no sense for any keyspace.
    #[error("invalid replication factor {factor} for {scope}")]
    InvalidFactor { scope: String, factor: usize },

    /// Operation referenced a keyspace that was never registered.
    #[error("unknown keyspace: {0}")]
    UnknownKeyspace(String),

    /// Resolution attempted against a topology with no member nodes.
    #[error("topology has no member nodes")]
    EmptyTopology,
}
