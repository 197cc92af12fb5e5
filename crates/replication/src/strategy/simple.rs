//! Simple replication strategy.
//!
//! Places N replicas sequentially around the ring, clockwise from the
//! token's owner. Works well for single-datacenter clusters where network
//! topology doesn't matter.
//!
//! # Algorithm
//!
//! 1. Walk the ring clockwise starting at the vnode owning the token
//! 2. Collect the first N *distinct physical* nodes (consecutive vnodes
//!    often belong to the same node)
//! 3. Return them in encounter order (primary first)
//!
//! # Limitations
//!
//! - Ignores datacenter/rack placement; replicas may share a failure domain
//! - Use `NetworkTopologyStrategy` for multi-DC deployments

use corelib::node::NodeId;
use corelib::token::Murmur3Token;
use corelib::topology::TopologySnapshot;

use crate::placement::ReplicaSet;
use crate::strategy::ReplicationStrategy;

/// Simple strategy: N distinct nodes, ring order from the token's owner.
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    replication_factor: usize,
}

impl SimpleStrategy {
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for(&self, token: Murmur3Token, snapshot: &TopologySnapshot) -> ReplicaSet {
        let mut seen: Vec<NodeId> = Vec::with_capacity(self.replication_factor);
        let mut replicas = Vec::with_capacity(self.replication_factor);

        for entry in snapshot.ring().walk_from(token) {
            if seen.contains(&entry.node_id) {
                continue;
            }
            seen.push(entry.node_id);
            if let Some(node) = snapshot.node(&entry.node_id) {
                replicas.push(node.clone());
            }
            if replicas.len() >= self.replication_factor {
                break;
            }
        }

        let under_replicated = replicas.len() < self.replication_factor;
        ReplicaSet::new(replicas, under_replicated, snapshot.version())
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
