//! Operation requests and outcomes.
//!
//! An [`OperationRequest`] is created per CRUD call and consumed
//! immediately; an [`OperationOutcome`] is returned to the caller and
//! always carries per-replica detail, so partial success (more acks than
//! required, fewer than the full set) is observable rather than hidden.

use corelib::node::NodeId;
use replication::ConsistencyLevel;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// What the operation does to the row.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum OperationKind {
    Create,
    Read,
    Update,
    Delete,
}

impl OperationKind {
    pub fn is_read(&self) -> bool {
        *self == OperationKind::Read
    }

    pub fn is_write(&self) -> bool {
        !self.is_read()
    }
}

/// A single CRUD intent against one partition key.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OperationRequest {
    pub keyspace: String,
    pub key: Vec<u8>,
    pub kind: OperationKind,
    /// Row payload; present for Create/Update only.
    pub payload: Option<Value>,
    pub consistency: ConsistencyLevel,
}

impl OperationRequest {
    pub fn create(
        keyspace: impl Into<String>,
        key: impl Into<Vec<u8>>,
        payload: Value,
        consistency: ConsistencyLevel,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            key: key.into(),
            kind: OperationKind::Create,
            payload: Some(payload),
            consistency,
        }
    }

    pub fn read(
        keyspace: impl Into<String>,
        key: impl Into<Vec<u8>>,
        consistency: ConsistencyLevel,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            key: key.into(),
            kind: OperationKind::Read,
            payload: None,
            consistency,
        }
    }

    pub fn update(
        keyspace: impl Into<String>,
        key: impl Into<Vec<u8>>,
        payload: Value,
        consistency: ConsistencyLevel,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            key: key.into(),
            kind: OperationKind::Update,
            payload: Some(payload),
            consistency,
        }
    }

    pub fn delete(
        keyspace: impl Into<String>,
        key: impl Into<Vec<u8>>,
        consistency: ConsistencyLevel,
    ) -> Self {
        Self {
            keyspace: keyspace.into(),
            key: key.into(),
            kind: OperationKind::Delete,
            payload: None,
            consistency,
        }
    }
}

/// One stored row version, as returned by a replica.
///
/// The storage engine supplies `timestamp_micros`; the coordinator uses it
/// for last-write-wins reconciliation and never invents its own ordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub payload: Value,
    pub timestamp_micros: i64,
}

/// Per-replica result of one dispatched operation.
#[derive(Clone, Debug)]
pub struct ReplicaAck {
    pub node: NodeId,
    /// `Err` holds the replica's failure description.
    pub result: Result<(), String>,
}

impl ReplicaAck {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated outcome of a coordinated operation.
///
/// Returned on success; `achieved` may exceed `required` (late acks that
/// arrived before short-circuit) and `acks` may be shorter than the replica
/// set (stragglers cancelled after the requirement was met).
#[derive(Clone, Debug)]
pub struct OperationOutcome {
    pub required: usize,
    pub achieved: usize,
    pub acks: Vec<ReplicaAck>,
    /// Reconciled row for reads; `None` for writes or missing rows.
    pub row: Option<Row>,
}
