//! Node abstractions for the cluster topology.
//!
//! Nodes represent physical participants in the cluster. They are identified
//! by a compact `NodeId` that is cheap to compare and hash, and carry the
//! placement metadata (datacenter, rack) used by topology-aware replication.

use std::fmt;
use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

/// Compact identifier for a node in the cluster.
///
/// Newtype over `u128` so comparisons and hashing are very fast while giving
/// plenty of space for uniqueness.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct NodeId(pub u128);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

/// Liveness state of a node, as reported by cluster discovery.
///
/// `Unknown` is the state before the first liveness event arrives for a
/// node; availability checks treat it the same as `Down`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum NodeState {
    Up,
    Down,
    Unknown,
}

/// Physical node participating in the cluster.
///
/// Keep this struct small and cheap to clone; heavy mutable state
/// (connections, metrics, etc.) lives in the storage-engine collaborator.
/// Liveness is mutated only through topology-change events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Network endpoint of the node.
    pub address: SocketAddr,
    /// Datacenter label for topology-aware replication.
    pub datacenter: String,
    /// Rack label for rack-aware placement.
    pub rack: String,
    /// Current liveness state.
    pub state: NodeState,
}

impl Node {
    /// Construct a new node. Liveness starts as `Up`: discovery only hands
    /// us nodes it has successfully contacted.
    pub fn new(
        id: NodeId,
        address: SocketAddr,
        datacenter: impl Into<String>,
        rack: impl Into<String>,
    ) -> Self {
        Self {
            id,
            address,
            datacenter: datacenter.into(),
            rack: rack.into(),
            state: NodeState::Up,
        }
    }

    /// True only when the node is known reachable.
    pub fn is_up(&self) -> bool {
        self.state == NodeState::Up
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}/{}, {:?})",
            self.address, self.datacenter, self.rack, self.state
        )
    }
}
