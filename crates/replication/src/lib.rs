//! Replica placement and consistency arithmetic.
//!
//! This crate determines, for a partition key:
//! - which nodes are responsible for storing it (replication strategies),
//! - how many of them must acknowledge an operation at a given
//!   consistency level.
//!
//! Placement is computed from raw ring ownership and is deliberately
//! liveness-independent: quorum arithmetic over a fixed replica set stays
//! meaningful while individual nodes flap. Liveness filtering is the
//! coordinator's job.

pub mod config;
pub mod consistency;
pub mod error;
pub mod placement;
pub mod resolver;
pub mod strategy;

pub use config::ReplicationConfig;
pub use consistency::ConsistencyLevel;
pub use error::ReplicationError;
pub use placement::ReplicaSet;
pub use resolver::ReplicaResolver;
pub use strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy};
