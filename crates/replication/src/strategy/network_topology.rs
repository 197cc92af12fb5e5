//! Datacenter-aware replication strategy.
//!
//! Each datacenter in the configuration gets its own clockwise walk,
//! restricted to nodes whose datacenter label matches, collecting that
//! datacenter's factor of distinct nodes. Datacenter groups are
//! concatenated in `BTreeMap` key order, so the overall sequence is
//! deterministic for a given configuration and snapshot.
//!
//! A datacenter with fewer members than its factor contributes everything
//! it has and marks the set under-replicated; the shortfall is surfaced,
//! never padded from other datacenters.

use std::collections::BTreeMap;

use corelib::node::NodeId;
use corelib::token::Murmur3Token;
use corelib::topology::TopologySnapshot;

use crate::placement::ReplicaSet;
use crate::strategy::ReplicationStrategy;

/// Per-datacenter replication factors.
#[derive(Debug, Clone)]
pub struct NetworkTopologyStrategy {
    factors: BTreeMap<String, usize>,
}

impl NetworkTopologyStrategy {
    pub fn new(factors: BTreeMap<String, usize>) -> Self {
        Self { factors }
    }

    pub fn factor_for(&self, dc: &str) -> Option<usize> {
        self.factors.get(dc).copied()
    }
}

impl ReplicationStrategy for NetworkTopologyStrategy {
    fn replication_factor(&self) -> usize {
        self.factors.values().sum()
    }

    fn replicas_for(&self, token: Murmur3Token, snapshot: &TopologySnapshot) -> ReplicaSet {
        let mut replicas = Vec::with_capacity(self.replication_factor());
        let mut under_replicated = false;

        for (dc, factor) in &self.factors {
            let mut seen: Vec<NodeId> = Vec::with_capacity(*factor);

            for entry in snapshot.ring().walk_from(token) {
                if seen.len() >= *factor {
                    break;
                }
                if seen.contains(&entry.node_id) {
                    continue;
                }
                let Some(node) = snapshot.node(&entry.node_id) else {
                    continue;
                };
                if node.datacenter != *dc {
                    continue;
                }
                seen.push(entry.node_id);
                replicas.push(node.clone());
            }

            if seen.len() < *factor {
                under_replicated = true;
            }
        }

        ReplicaSet::new(replicas, under_replicated, snapshot.version())
    }

    fn name(&self) -> &'static str {
        "NetworkTopologyStrategy"
    }
}
