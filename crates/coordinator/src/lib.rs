//! Consistency coordination and CRUD execution.
//!
//! This crate turns high-level create/read/update/delete intents into
//! fanned-out replica operations:
//!
//! - [`StorageEngine`] is the narrow seam to the external storage engine;
//!   everything on the other side of it (wire protocol, schema, storage)
//!   is out of scope here
//! - [`ConsistencyCoordinator`] dispatches one operation to a replica set,
//!   aggregates acknowledgments against the requested consistency level,
//!   and reconciles divergent reads by last-write-wins
//! - [`CrudExecutor`] resolves replicas, applies deadlines, and retries
//!   timeouts with fresh topology

pub mod coordinator;
pub mod engine;
pub mod error;
pub mod executor;
pub mod request;

pub use coordinator::ConsistencyCoordinator;
pub use engine::{EngineError, NodeResponse, StorageEngine};
pub use error::CoordinatorError;
pub use executor::{CrudExecutor, ExecutorConfig};
pub use request::{OperationKind, OperationOutcome, OperationRequest, ReplicaAck, Row};
