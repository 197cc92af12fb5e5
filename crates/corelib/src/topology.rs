//! Cluster topology tracking.
//!
//! [`TopologyStore`] owns the current view of cluster membership and
//! liveness. Reads take a cheap reference-counted [`TopologySnapshot`];
//! every mutation builds a new snapshot with a bumped version and swaps it
//! in, so concurrent resolutions always see a stable, internally consistent
//! view. Mutations are serialized by the write lock; they never block
//! readers holding an already-acquired snapshot.
//!
//! The store performs no network I/O. Membership and liveness changes are
//! delivered by the external cluster-discovery collaborator as
//! [`TopologyEvent`]s.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::node::{Node, NodeId, NodeState};
use crate::ring::{HashRing, RingBuilder, DEFAULT_VNODES};

/// Topology-change notification from the discovery feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TopologyEvent {
    NodeAdded(Node),
    NodeRemoved(NodeId),
    NodeUp(NodeId),
    NodeDown(NodeId),
}

/// Immutable view of the cluster at a point in time.
///
/// Snapshots are versioned; the version increases monotonically with every
/// topology mutation, including liveness flips that leave the ring itself
/// untouched.
#[derive(Debug, Clone)]
pub struct TopologySnapshot {
    version: u64,
    nodes: BTreeMap<NodeId, Node>,
    ring: HashRing,
}

impl TopologySnapshot {
    fn empty() -> Self {
        Self {
            version: 0,
            nodes: BTreeMap::new(),
            ring: HashRing::default(),
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn ring(&self) -> &HashRing {
        &self.ring
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Member nodes in ring order: ordered by each node's first vnode
    /// position, which is how a clockwise walk first encounters them.
    pub fn nodes_in_ring_order(&self) -> Vec<&Node> {
        let mut seen = Vec::with_capacity(self.nodes.len());
        let mut ordered = Vec::with_capacity(self.nodes.len());
        for entry in self.ring.entries() {
            if !seen.contains(&entry.node_id) {
                seen.push(entry.node_id);
                if let Some(node) = self.nodes.get(&entry.node_id) {
                    ordered.push(node);
                }
            }
        }
        ordered
    }

    /// All nodes whose datacenter label matches `dc`.
    pub fn nodes_in_datacenter(&self, dc: &str) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.datacenter == dc).collect()
    }

    /// Count of nodes in `dc`, regardless of liveness.
    pub fn datacenter_size(&self, dc: &str) -> usize {
        self.nodes.values().filter(|n| n.datacenter == dc).count()
    }
}

/// Owner of the mutable topology state.
///
/// All mutation goes through `apply`/`add_node`/`remove_node`/
/// `mark_reachable`/`mark_unreachable`; each builds a new snapshot under the
/// write lock. `snapshot()` clones an `Arc` under the read lock and never
/// waits on an in-progress rebuild beyond the swap itself.
#[derive(Debug)]
pub struct TopologyStore {
    current: RwLock<Arc<TopologySnapshot>>,
    vnodes: usize,
}

impl TopologyStore {
    /// Create an empty store using [`DEFAULT_VNODES`] tokens per node.
    pub fn new() -> Self {
        Self::with_vnodes(DEFAULT_VNODES)
    }

    /// Create an empty store with an explicit vnode count per node.
    pub fn with_vnodes(vnodes: usize) -> Self {
        Self {
            current: RwLock::new(Arc::new(TopologySnapshot::empty())),
            vnodes,
        }
    }

    /// Current topology view. Lock-free for practical purposes: the read
    /// lock is held only long enough to clone the `Arc`.
    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Convenience passthrough to the current snapshot.
    pub fn nodes_in_datacenter(&self, dc: &str) -> Vec<Node> {
        self.snapshot()
            .nodes_in_datacenter(dc)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Apply a discovery event to the topology.
    pub fn apply(&self, event: TopologyEvent) -> Result<()> {
        match event {
            TopologyEvent::NodeAdded(node) => self.add_node(node),
            TopologyEvent::NodeRemoved(id) => self.remove_node(&id).map(|_| ()),
            TopologyEvent::NodeUp(id) => self.mark_reachable(&id),
            TopologyEvent::NodeDown(id) => self.mark_unreachable(&id),
        }
    }

    /// Add a node to the ring. Re-adding an existing id refreshes its
    /// metadata but does not duplicate its vnodes.
    pub fn add_node(&self, node: Node) -> Result<()> {
        let mut guard = self.current.write();
        let prev = Arc::clone(&guard);
        let mut nodes = prev.nodes.clone();
        let rebuild = !nodes.contains_key(&node.id);
        nodes.insert(node.id, node);
        let ring = if rebuild {
            RingBuilder::new()
                .with_vnodes(self.vnodes)
                .add_nodes(nodes.keys().copied())
                .build()
        } else {
            prev.ring.clone()
        };
        *guard = Arc::new(TopologySnapshot {
            version: prev.version + 1,
            nodes,
            ring,
        });
        Ok(())
    }

    /// Remove a node on decommission. Returns `false` if it was not a member.
    pub fn remove_node(&self, id: &NodeId) -> Result<bool> {
        let mut guard = self.current.write();
        let prev = Arc::clone(&guard);
        if !prev.nodes.contains_key(id) {
            return Ok(false);
        }
        let mut nodes = prev.nodes.clone();
        nodes.remove(id);
        let ring = RingBuilder::new()
            .with_vnodes(self.vnodes)
            .add_nodes(nodes.keys().copied())
            .build();
        *guard = Arc::new(TopologySnapshot {
            version: prev.version + 1,
            nodes,
            ring,
        });
        Ok(true)
    }

    /// Mark a node reachable. Idempotent; never reorders the ring.
    pub fn mark_reachable(&self, id: &NodeId) -> Result<()> {
        self.set_state(id, NodeState::Up)
    }

    /// Mark a node unreachable. Idempotent; never reorders the ring.
    pub fn mark_unreachable(&self, id: &NodeId) -> Result<()> {
        self.set_state(id, NodeState::Down)
    }

    fn set_state(&self, id: &NodeId, state: NodeState) -> Result<()> {
        let mut guard = self.current.write();
        let prev = Arc::clone(&guard);
        let node = prev.nodes.get(id).ok_or(Error::UnknownNode(*id))?;
        if node.state == state {
            return Ok(());
        }
        let mut nodes = prev.nodes.clone();
        if let Some(n) = nodes.get_mut(id) {
            n.state = state;
        }
        *guard = Arc::new(TopologySnapshot {
            version: prev.version + 1,
            nodes,
            ring: prev.ring.clone(),
        });
        Ok(())
    }
}

impl Default for TopologyStore {
    fn default() -> Self {
        Self::new()
    }
}
