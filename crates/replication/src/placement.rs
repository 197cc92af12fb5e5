//! Replica sets: the ordered nodes responsible for one partition.

use corelib::node::Node;

/// Ordered, deduplicated set of replica nodes for a token.
///
/// The first entry is the primary (coordinator-preferred) replica. A
/// replica set is a derived value: it is recomputed on every resolution
/// against an explicit topology snapshot and never persisted.
///
/// Liveness is *not* applied here: the set reflects raw ring ownership so
/// consistency arithmetic stays stable across topology flaps. Use
/// [`ReplicaSet::live_count`] and friends when availability matters.
#[derive(Debug, Clone)]
pub struct ReplicaSet {
    nodes: Vec<Node>,
    under_replicated: bool,
    snapshot_version: u64,
}

impl ReplicaSet {
    pub fn new(nodes: Vec<Node>, under_replicated: bool, snapshot_version: u64) -> Self {
        Self {
            nodes,
            under_replicated,
            snapshot_version,
        }
    }

    /// All replicas, primary first.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The coordinator-preferred replica.
    pub fn primary(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// True when some datacenter had fewer nodes than its configured
    /// factor, so this set is shorter than the configuration asks for.
    pub fn under_replicated(&self) -> bool {
        self.under_replicated
    }

    /// Version of the topology snapshot this set was computed against.
    pub fn snapshot_version(&self) -> u64 {
        self.snapshot_version
    }

    /// Replicas currently known reachable.
    pub fn live_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_up()).count()
    }

    /// Replicas in `dc`, in set order.
    pub fn nodes_in_datacenter<'a>(&'a self, dc: &str) -> Vec<&'a Node> {
        self.nodes.iter().filter(|n| n.datacenter == dc).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}

impl<'a> IntoIterator for &'a ReplicaSet {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
