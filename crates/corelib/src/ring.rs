//! Consistent hash ring.
//!
//! The ring holds the token positions (virtual nodes) of every member node,
//! sorted by token, and answers two questions:
//!
//! - which node owns a given token (`owner_of`)
//! - what is the clockwise sequence of vnode entries starting at a token
//!   (`walk_from`), which replication strategies use to collect replicas
//!
//! Rings are immutable once built. Topology snapshots are copy-on-write, so
//! membership changes build a fresh ring rather than mutating in place;
//! liveness changes reuse the ring untouched.

use crate::node::NodeId;
use crate::token::Murmur3Token;
use crate::vnode::VirtualNode;

/// Default number of virtual nodes per physical node.
pub const DEFAULT_VNODES: usize = 256;

/// Immutable, token-sorted hash ring.
#[derive(Debug, Clone, Default)]
pub struct HashRing {
    /// All vnode entries, sorted by token ascending.
    entries: Vec<VirtualNode>,
}

impl HashRing {
    /// Number of token positions on the ring.
    pub fn token_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in ring order.
    pub fn entries(&self) -> &[VirtualNode] {
        &self.entries
    }

    /// Index of the first vnode at or after `token`, wrapping to 0 past the
    /// last entry.
    fn successor_index(&self, token: Murmur3Token) -> usize {
        let idx = self.entries.partition_point(|v| v.token < token);
        if idx == self.entries.len() {
            0
        } else {
            idx
        }
    }

    /// The physical node owning `token`: the first vnode clockwise from it.
    pub fn owner_of(&self, token: Murmur3Token) -> Option<NodeId> {
        if self.entries.is_empty() {
            return None;
        }
        Some(self.entries[self.successor_index(token)].node_id)
    }

    /// Clockwise walk over all vnode entries starting at `token`'s owner.
    ///
    /// Yields exactly `token_count()` entries, wrapping around once.
    pub fn walk_from(&self, token: Murmur3Token) -> impl Iterator<Item = &VirtualNode> {
        let start = if self.entries.is_empty() {
            0
        } else {
            self.successor_index(token)
        };
        self.entries[start..].iter().chain(self.entries[..start].iter())
    }
}

/// Builds a [`HashRing`] from member nodes.
///
/// # Example
///
/// ```
/// use corelib::node::NodeId;
/// use corelib::ring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .with_vnodes(8)
///     .add_node(NodeId(1))
///     .add_node(NodeId(2))
///     .build();
/// assert_eq!(ring.token_count(), 16);
/// ```
#[derive(Debug)]
pub struct RingBuilder {
    vnodes: usize,
    nodes: Vec<NodeId>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self {
            vnodes: DEFAULT_VNODES,
            nodes: Vec::new(),
        }
    }

    /// Override the vnode count applied to every node.
    pub fn with_vnodes(mut self, vnodes: usize) -> Self {
        self.vnodes = vnodes;
        self
    }

    pub fn add_node(mut self, node_id: NodeId) -> Self {
        self.nodes.push(node_id);
        self
    }

    pub fn add_nodes(mut self, node_ids: impl IntoIterator<Item = NodeId>) -> Self {
        self.nodes.extend(node_ids);
        self
    }

    pub fn build(self) -> HashRing {
        let mut entries = Vec::with_capacity(self.nodes.len() * self.vnodes);
        for node_id in &self.nodes {
            for index in 0..self.vnodes {
                entries.push(VirtualNode::from_index(*node_id, index));
            }
        }
        entries.sort();
        // Token collisions across nodes are astronomically unlikely with a
        // 64-bit space, but keep the ring well-formed if one happens.
        entries.dedup_by_key(|v| v.token);
        HashRing { entries }
    }
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Token;

    #[test]
    fn test_empty_ring() {
        let ring = HashRing::default();
        assert!(ring.is_empty());
        assert_eq!(ring.owner_of(Murmur3Token(42)), None);
        assert_eq!(ring.walk_from(Murmur3Token(42)).count(), 0);
    }

    #[test]
    fn test_walk_wraps_once() {
        let ring = RingBuilder::new()
            .with_vnodes(4)
            .add_node(NodeId(1))
            .add_node(NodeId(2))
            .build();
        assert_eq!(ring.token_count(), 8);

        let visited: Vec<_> = ring.walk_from(Murmur3Token::zero()).collect();
        assert_eq!(visited.len(), 8);
    }

    #[test]
    fn test_owner_is_first_walk_entry() {
        let ring = RingBuilder::new()
            .with_vnodes(4)
            .add_nodes([NodeId(1), NodeId(2), NodeId(3)])
            .build();

        for key in [b"a".as_slice(), b"b", b"partition-key"] {
            let token = Murmur3Token::from_bytes(key);
            let owner = ring.owner_of(token).unwrap();
            let first = ring.walk_from(token).next().unwrap();
            assert_eq!(owner, first.node_id);
        }
    }

    #[test]
    fn test_owner_wraps_past_last_token() {
        let ring = RingBuilder::new()
            .with_vnodes(2)
            .add_node(NodeId(1))
            .build();
        // A token beyond the last vnode wraps to the first entry.
        let owner = ring.owner_of(<Murmur3Token as Token>::max());
        assert_eq!(owner, Some(NodeId(1)));
    }
}
