//! The storage-engine seam.
//!
//! The coordinator never talks wire protocol. Everything it needs from the
//! cluster is behind [`StorageEngine`]: execute one operation on one
//! replica, get one response or one failure. Real deployments implement
//! this over their transport; tests implement it in memory.

use async_trait::async_trait;
use thiserror::Error;

use corelib::node::Node;

use crate::request::{OperationRequest, Row};

/// Single-replica response.
#[derive(Clone, Debug, Default)]
pub struct NodeResponse {
    /// The replica's current row version, for reads. `None` means the
    /// replica has no row for the key (or the operation was a write).
    pub row: Option<Row>,
}

impl NodeResponse {
    /// Write acknowledgment carrying no row.
    pub fn ack() -> Self {
        Self { row: None }
    }

    /// Read response.
    pub fn with_row(row: Option<Row>) -> Self {
        Self { row }
    }
}

/// Failure executing on a single replica.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    /// The replica could not be reached at all.
    #[error("node unreachable: {0}")]
    Unreachable(String),
    /// The replica actively rejected the operation.
    #[error("replica rejected operation: {0}")]
    Rejected(String),
}

/// External storage-engine collaborator.
///
/// Implementations own the wire protocol, schema enforcement, and row
/// timestamping. One call executes one operation on one node.
#[async_trait]
pub trait StorageEngine: Send + Sync + 'static {
    async fn execute_on_node(
        &self,
        node: &Node,
        request: &OperationRequest,
    ) -> Result<NodeResponse, EngineError>;
}
