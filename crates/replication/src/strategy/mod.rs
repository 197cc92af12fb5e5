//! Replication strategy abstractions.
//!
//! A replication strategy maps a token to the ordered set of nodes
//! responsible for it:
//!
//! - **SimpleStrategy**: N distinct nodes placed sequentially around the ring
//! - **NetworkTopologyStrategy**: per-datacenter factors, walk restricted to
//!   each datacenter's nodes
//!
//! Strategies are pure functions of `(token, snapshot)`: same inputs, same
//! replica set. They ignore liveness on purpose; raw ownership must stay
//! stable while nodes flap, or quorum arithmetic over the set would shift
//! underneath in-flight operations.

pub mod network_topology;
pub mod simple;

pub use network_topology::NetworkTopologyStrategy;
pub use simple::SimpleStrategy;

use corelib::token::Murmur3Token;
use corelib::topology::TopologySnapshot;

use crate::placement::ReplicaSet;

/// Trait for replication strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they are shared
/// across concurrent resolutions.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Total number of replicas this strategy aims for.
    fn replication_factor(&self) -> usize;

    /// Ordered replica set for `token` under `snapshot`.
    ///
    /// Returns fewer nodes than the factor (with the under-replication flag
    /// set) when a datacenter simply does not have enough members; never
    /// pads, never fails for that reason.
    fn replicas_for(&self, token: Murmur3Token, snapshot: &TopologySnapshot) -> ReplicaSet;

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
