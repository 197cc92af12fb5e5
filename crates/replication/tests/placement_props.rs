//! Property tests for replica placement.

use std::collections::BTreeMap;
use std::collections::HashSet;

use proptest::prelude::*;

use corelib::node::{Node, NodeId};
use corelib::token::Murmur3Token;
use corelib::topology::TopologyStore;
use replication::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy};

fn build_store(node_count: u128, dcs: &[&str]) -> TopologyStore {
    let store = TopologyStore::with_vnodes(8);
    for i in 1..=node_count {
        let dc = dcs[(i as usize - 1) % dcs.len()];
        let address = format!("127.0.0.1:{}", 9000 + i).parse().unwrap();
        store
            .add_node(Node::new(NodeId(i), address, dc, "rack1"))
            .unwrap();
    }
    store
}

proptest! {
    #[test]
    fn simple_placement_has_no_duplicates(
        raw_token in any::<u64>(),
        node_count in 1u128..8,
        factor in 1usize..6,
    ) {
        let store = build_store(node_count, &["datacenter1"]);
        let snapshot = store.snapshot();
        let strategy = SimpleStrategy::new(factor);

        let set = strategy.replicas_for(Murmur3Token(raw_token), &snapshot);

        let ids: HashSet<_> = set.iter().map(|n| n.id).collect();
        prop_assert_eq!(ids.len(), set.len(), "duplicate physical node in set");
        prop_assert!(set.len() <= factor);
        prop_assert_eq!(set.len(), factor.min(node_count as usize));
    }

    #[test]
    fn simple_placement_is_deterministic(
        raw_token in any::<u64>(),
        node_count in 1u128..8,
    ) {
        let store = build_store(node_count, &["datacenter1"]);
        let snapshot = store.snapshot();
        let strategy = SimpleStrategy::new(3);
        let token = Murmur3Token(raw_token);

        let a: Vec<_> = strategy.replicas_for(token, &snapshot).iter().map(|n| n.id).collect();
        let b: Vec<_> = strategy.replicas_for(token, &snapshot).iter().map(|n| n.id).collect();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn network_topology_respects_per_dc_factors(
        raw_token in any::<u64>(),
        east in 1usize..4,
        west in 1usize..4,
    ) {
        let store = build_store(6, &["us-east", "eu-west"]);
        let snapshot = store.snapshot();
        let factors: BTreeMap<String, usize> = [
            ("us-east".to_string(), east),
            ("eu-west".to_string(), west),
        ]
        .into_iter()
        .collect();
        let strategy = NetworkTopologyStrategy::new(factors);

        let set = strategy.replicas_for(Murmur3Token(raw_token), &snapshot);

        // 3 nodes per datacenter exist.
        prop_assert_eq!(set.nodes_in_datacenter("us-east").len(), east.min(3));
        prop_assert_eq!(set.nodes_in_datacenter("eu-west").len(), west.min(3));
        prop_assert!(set.len() <= east + west);

        let ids: HashSet<_> = set.iter().map(|n| n.id).collect();
        prop_assert_eq!(ids.len(), set.len(), "duplicate physical node in set");
    }
}
