//! Core library for the cluster client runtime.
//!
//! This crate provides the fundamental abstractions for topology-aware
//! key placement:
//! - Token type and partitioner (stable key hashing)
//! - Virtual node and ring management
//! - Node identity, datacenter/rack placement, and liveness
//! - Versioned topology snapshots fed by cluster discovery events

pub mod error;
pub mod node;
pub mod partitioner;
pub mod ring;
pub mod token;
pub mod topology;
pub mod vnode;

pub use error::{Error, Result};
pub use node::{Node, NodeId, NodeState};
pub use partitioner::{Murmur3Partitioner, Partitioner};
pub use ring::{HashRing, RingBuilder};
pub use token::{Murmur3Token, Token};
pub use topology::{TopologyEvent, TopologySnapshot, TopologyStore};
pub use vnode::VirtualNode;
