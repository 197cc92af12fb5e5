//! Replica resolution: partition key → replica set.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use corelib::partitioner::{Murmur3Partitioner, Partitioner};
use corelib::topology::TopologyStore;

use crate::config::ReplicationConfig;
use crate::error::ReplicationError;
use crate::placement::ReplicaSet;
use crate::strategy::ReplicationStrategy;

struct Keyspace {
    config: ReplicationConfig,
    strategy: Arc<dyn ReplicationStrategy>,
}

/// Hashes partition keys and resolves them to replica sets.
///
/// Resolution is a pure function of `(key, topology snapshot, keyspace
/// config)`: the same inputs always produce the same set, which keeps
/// placement deterministic and testable. The resolver holds no per-key
/// state; it consults the topology store for a fresh snapshot on every
/// call.
pub struct ReplicaResolver {
    topology: Arc<TopologyStore>,
    partitioner: Murmur3Partitioner,
    keyspaces: RwLock<HashMap<String, Keyspace>>,
}

impl ReplicaResolver {
    pub fn new(topology: Arc<TopologyStore>) -> Self {
        Self {
            topology,
            partitioner: Murmur3Partitioner,
            keyspaces: RwLock::new(HashMap::new()),
        }
    }

    /// Register (or replace) a keyspace's replication configuration.
    pub fn register_keyspace(&self, name: impl Into<String>, config: ReplicationConfig) {
        let name = name.into();
        let strategy: Arc<dyn ReplicationStrategy> = config.build_strategy().into();
        debug!(keyspace = %name, strategy = strategy.name(), "registered keyspace");
        self.keyspaces
            .write()
            .insert(name, Keyspace { config, strategy });
    }

    /// Replication configuration for `keyspace`, if registered.
    pub fn keyspace_config(&self, keyspace: &str) -> Option<ReplicationConfig> {
        self.keyspaces.read().get(keyspace).map(|k| k.config.clone())
    }

    /// Resolve `key` to its ordered replica set under `keyspace`'s
    /// configuration and the current topology snapshot.
    pub fn resolve(&self, keyspace: &str, key: &[u8]) -> Result<ReplicaSet, ReplicationError> {
        let strategy = {
            let keyspaces = self.keyspaces.read();
            let entry = keyspaces
                .get(keyspace)
                .ok_or_else(|| ReplicationError::UnknownKeyspace(keyspace.to_string()))?;
            Arc::clone(&entry.strategy)
        };

        let snapshot = self.topology.snapshot();
        if snapshot.ring().is_empty() {
            return Err(ReplicationError::EmptyTopology);
        }

        let token = self.partitioner.partition(key);
        let set = strategy.replicas_for(token, &snapshot);

        if set.under_replicated() {
            warn!(
                keyspace,
                strategy = strategy.name(),
                replicas = set.len(),
                factor = strategy.replication_factor(),
                "topology is under-replicated for this keyspace"
            );
        }
        debug!(
            keyspace,
            ?token,
            replicas = set.len(),
            snapshot_version = set.snapshot_version(),
            "resolved replica set"
        );

        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corelib::node::{Node, NodeId};

    fn resolver_with_nodes(n: u128) -> ReplicaResolver {
        let store = Arc::new(TopologyStore::with_vnodes(8));
        for i in 1..=n {
            let address = format!("127.0.0.1:{}", 9000 + i).parse().unwrap();
            store
                .add_node(Node::new(NodeId(i), address, "datacenter1", "rack1"))
                .unwrap();
        }
        ReplicaResolver::new(store)
    }

    #[test]
    fn test_unknown_keyspace() {
        let resolver = resolver_with_nodes(3);
        assert_eq!(
            resolver.resolve("missing", b"key").unwrap_err(),
            ReplicationError::UnknownKeyspace("missing".to_string())
        );
    }

    #[test]
    fn test_empty_topology() {
        let resolver = ReplicaResolver::new(Arc::new(TopologyStore::with_vnodes(8)));
        resolver.register_keyspace("ks", ReplicationConfig::simple(1).unwrap());
        assert_eq!(
            resolver.resolve("ks", b"key").unwrap_err(),
            ReplicationError::EmptyTopology
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let resolver = resolver_with_nodes(3);
        resolver.register_keyspace("ks", ReplicationConfig::simple(3).unwrap());

        let a: Vec<_> = resolver
            .resolve("ks", b"user-1")
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        let b: Vec<_> = resolver
            .resolve("ks", b"user-1")
            .unwrap()
            .iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_set_length_matches_factor() {
        let resolver = resolver_with_nodes(5);
        resolver.register_keyspace("ks", ReplicationConfig::simple(3).unwrap());

        let set = resolver.resolve("ks", b"some-user").unwrap();
        assert_eq!(set.len(), 3);
        assert!(!set.under_replicated());
    }

    #[test]
    fn test_config_lookup() {
        let resolver = resolver_with_nodes(1);
        let cfg = ReplicationConfig::simple(1).unwrap();
        resolver.register_keyspace("ks", cfg.clone());
        assert_eq!(resolver.keyspace_config("ks"), Some(cfg));
        assert_eq!(resolver.keyspace_config("nope"), None);
    }
}
