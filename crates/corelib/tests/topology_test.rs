//! Tests for the topology store: snapshot isolation, liveness, events.

use std::net::SocketAddr;

use corelib::error::Error;
use corelib::node::{Node, NodeId, NodeState};
use corelib::topology::{TopologyEvent, TopologyStore};

fn node(id: u128, port: u16, dc: &str) -> Node {
    let address: SocketAddr = format!("127.0.0.1:{}", port).parse().unwrap();
    Node::new(NodeId(id), address, dc, "rack1")
}

fn three_node_store() -> TopologyStore {
    let store = TopologyStore::with_vnodes(8);
    store.add_node(node(1, 9042, "datacenter1")).unwrap();
    store.add_node(node(2, 9043, "datacenter1")).unwrap();
    store.add_node(node(3, 9044, "datacenter1")).unwrap();
    store
}

#[test]
fn test_membership_and_versioning() {
    let store = three_node_store();
    let snap = store.snapshot();

    assert_eq!(snap.version(), 3);
    assert_eq!(snap.node_count(), 3);
    assert_eq!(snap.ring().token_count(), 24);
    assert_eq!(snap.nodes_in_ring_order().len(), 3);
}

#[test]
fn test_snapshot_is_isolated_from_later_mutations() {
    let store = three_node_store();
    let before = store.snapshot();

    store.mark_unreachable(&NodeId(2)).unwrap();

    // The old snapshot still sees node 2 as up.
    assert_eq!(before.node(&NodeId(2)).unwrap().state, NodeState::Up);
    let after = store.snapshot();
    assert_eq!(after.node(&NodeId(2)).unwrap().state, NodeState::Down);
    assert!(after.version() > before.version());
}

#[test]
fn test_liveness_is_idempotent_and_keeps_ring() {
    let store = three_node_store();
    let before = store.snapshot();

    store.mark_unreachable(&NodeId(3)).unwrap();
    let v1 = store.snapshot().version();
    store.mark_unreachable(&NodeId(3)).unwrap();
    let v2 = store.snapshot().version();
    assert_eq!(v1, v2, "repeated mark is a no-op");

    store.mark_reachable(&NodeId(3)).unwrap();
    assert_eq!(
        store.snapshot().node(&NodeId(3)).unwrap().state,
        NodeState::Up
    );

    // Liveness flips never move tokens.
    assert_eq!(before.ring().entries(), store.snapshot().ring().entries());
}

#[test]
fn test_liveness_on_unknown_node_errors() {
    let store = three_node_store();
    match store.mark_unreachable(&NodeId(99)) {
        Err(Error::UnknownNode(id)) => assert_eq!(id, NodeId(99)),
        other => panic!("expected UnknownNode, got {:?}", other),
    }
}

#[test]
fn test_remove_node_shrinks_ring() {
    let store = three_node_store();
    assert!(store.remove_node(&NodeId(2)).unwrap());
    assert!(!store.remove_node(&NodeId(2)).unwrap());

    let snap = store.snapshot();
    assert_eq!(snap.node_count(), 2);
    assert_eq!(snap.ring().token_count(), 16);
    assert!(snap.node(&NodeId(2)).is_none());
}

#[test]
fn test_readd_does_not_duplicate_vnodes() {
    let store = three_node_store();
    store.add_node(node(1, 9042, "datacenter1")).unwrap();
    assert_eq!(store.snapshot().ring().token_count(), 24);
}

#[test]
fn test_event_feed() {
    let store = TopologyStore::with_vnodes(4);
    store
        .apply(TopologyEvent::NodeAdded(node(1, 9042, "us-east")))
        .unwrap();
    store
        .apply(TopologyEvent::NodeAdded(node(2, 9043, "eu-west")))
        .unwrap();
    store.apply(TopologyEvent::NodeDown(NodeId(1))).unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.node(&NodeId(1)).unwrap().state, NodeState::Down);
    assert_eq!(snap.nodes_in_datacenter("eu-west").len(), 1);
    assert_eq!(snap.datacenter_size("us-east"), 1);

    store.apply(TopologyEvent::NodeRemoved(NodeId(1))).unwrap();
    assert_eq!(store.snapshot().node_count(), 1);
}

#[test]
fn test_nodes_in_datacenter_passthrough() {
    let store = TopologyStore::with_vnodes(4);
    store.add_node(node(1, 9042, "us-east")).unwrap();
    store.add_node(node(2, 9043, "us-east")).unwrap();
    store.add_node(node(3, 9044, "eu-west")).unwrap();

    let us = store.nodes_in_datacenter("us-east");
    assert_eq!(us.len(), 2);
    assert!(store.nodes_in_datacenter("ap-south").is_empty());
}
