//! Virtual node abstractions.
//!
//! Instead of each physical node owning a single token on the ring, each
//! node owns multiple tokens (virtual nodes). This gives:
//!
//! 1. **Better load distribution**: more tokens = smoother distribution of keys
//! 2. **Gradual rebalancing**: when nodes join/leave, only a fraction of keys move
//! 3. **Fault tolerance**: failure of one node affects fewer contiguous ranges
//!
//! Replica walks must deduplicate by `node_id`, since consecutive ring
//! entries frequently belong to the same physical node.

use crate::node::NodeId;
use crate::token::Murmur3Token;
use crate::token::Token;

/// A virtual node on the hash ring.
///
/// Represents a single token position owned by a physical node.
///
/// # Invariants
///
/// - Every `VirtualNode` belongs to exactly one physical node
/// - Tokens are ordered (vnodes sort by ring position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualNode {
    /// Token position on the ring, hashed from `"node_id:index"`.
    pub token: Murmur3Token,
    /// The physical node that owns this virtual node.
    pub node_id: NodeId,
}

impl VirtualNode {
    #[inline]
    pub fn new(token: Murmur3Token, node_id: NodeId) -> Self {
        Self { token, node_id }
    }

    /// Create a virtual node from a node ID and vnode index.
    ///
    /// The token is derived by hashing `"node_id:index"`, so a node's vnode
    /// positions are stable across snapshot rebuilds and process restarts.
    pub fn from_index(node_id: NodeId, vnode_index: usize) -> Self {
        let vnode_key = format!("{}:{}", node_id, vnode_index);
        let token = Murmur3Token::from_key(&vnode_key);
        Self::new(token, node_id)
    }

    #[inline]
    pub fn token(&self) -> Murmur3Token {
        self.token
    }

    #[inline]
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Clockwise distance to another virtual node.
    #[inline]
    pub fn distance_to(&self, other: &Self) -> Murmur3Token {
        self.token.distance_to(&other.token)
    }
}

impl std::fmt::Display for VirtualNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "VNode(token={:016x}, node={})", self.token.0, self.node_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnode_creation() {
        let vnode = VirtualNode::new(Murmur3Token(100), NodeId(1));
        assert_eq!(vnode.token(), Murmur3Token(100));
        assert_eq!(vnode.node_id(), NodeId(1));
    }

    #[test]
    fn test_vnode_from_index() {
        let vnode0 = VirtualNode::from_index(NodeId(1), 0);
        let vnode1 = VirtualNode::from_index(NodeId(1), 1);

        // Different positions, same owner.
        assert_ne!(vnode0.token(), vnode1.token());
        assert_eq!(vnode0.node_id(), vnode1.node_id());
    }

    #[test]
    fn test_vnode_derivation_is_stable() {
        assert_eq!(
            VirtualNode::from_index(NodeId(7), 3),
            VirtualNode::from_index(NodeId(7), 3)
        );
    }

    #[test]
    fn test_vnode_ordering() {
        let vnode1 = VirtualNode::new(Murmur3Token(100), NodeId(1));
        let vnode2 = VirtualNode::new(Murmur3Token(200), NodeId(2));

        assert!(vnode1 < vnode2); // Ordered by token
        assert_eq!(vnode1.distance_to(&vnode2), Murmur3Token(100));
    }
}
