//! CRUD execution with retry and timeout policy.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, warn};

use replication::{ConsistencyLevel, ReplicaResolver};

use crate::coordinator::ConsistencyCoordinator;
use crate::engine::StorageEngine;
use crate::error::CoordinatorError;
use crate::request::{OperationOutcome, OperationRequest};

/// Deadlines and retry bounds for CRUD operations.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Datacenter this client considers local (for `Local*` levels).
    pub local_datacenter: String,
    /// Extra attempts after a timeout. Only timeouts retry.
    pub max_retries: usize,
    /// Per-attempt deadline for reads.
    pub read_timeout: Duration,
    /// Per-attempt deadline for writes.
    pub write_timeout: Duration,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            local_datacenter: "datacenter1".to_string(),
            max_retries: 2,
            read_timeout: Duration::from_secs(2),
            write_timeout: Duration::from_secs(2),
        }
    }
}

/// High-level CRUD surface.
///
/// Each call resolves the key's replica set against the current topology
/// and delegates to the [`ConsistencyCoordinator`]. Timeouts retry up to
/// the configured bound, re-resolving replicas each attempt since topology
/// may have changed; unavailability fails immediately, because retrying
/// cannot help without a topology change. Writes are idempotent by key, so
/// retrying a timed-out write is safe.
pub struct CrudExecutor {
    resolver: Arc<ReplicaResolver>,
    coordinator: ConsistencyCoordinator,
    config: ExecutorConfig,
}

impl CrudExecutor {
    pub fn new(
        resolver: Arc<ReplicaResolver>,
        engine: Arc<dyn StorageEngine>,
        config: ExecutorConfig,
    ) -> Self {
        let coordinator = ConsistencyCoordinator::new(engine, config.local_datacenter.clone());
        Self {
            resolver,
            coordinator,
            config,
        }
    }

    pub async fn create(
        &self,
        keyspace: &str,
        key: &[u8],
        payload: Value,
        consistency: ConsistencyLevel,
    ) -> Result<OperationOutcome, CoordinatorError> {
        self.run(OperationRequest::create(keyspace, key, payload, consistency))
            .await
    }

    pub async fn read(
        &self,
        keyspace: &str,
        key: &[u8],
        consistency: ConsistencyLevel,
    ) -> Result<OperationOutcome, CoordinatorError> {
        self.run(OperationRequest::read(keyspace, key, consistency))
            .await
    }

    pub async fn update(
        &self,
        keyspace: &str,
        key: &[u8],
        payload: Value,
        consistency: ConsistencyLevel,
    ) -> Result<OperationOutcome, CoordinatorError> {
        self.run(OperationRequest::update(keyspace, key, payload, consistency))
            .await
    }

    pub async fn delete(
        &self,
        keyspace: &str,
        key: &[u8],
        consistency: ConsistencyLevel,
    ) -> Result<OperationOutcome, CoordinatorError> {
        self.run(OperationRequest::delete(keyspace, key, consistency))
            .await
    }

    async fn run(&self, request: OperationRequest) -> Result<OperationOutcome, CoordinatorError> {
        let per_attempt = if request.kind.is_read() {
            self.config.read_timeout
        } else {
            self.config.write_timeout
        };

        let mut attempt = 0;
        loop {
            let replicas = self.resolver.resolve(&request.keyspace, &request.key)?;
            if replicas.under_replicated() {
                warn!(
                    keyspace = %request.keyspace,
                    replicas = replicas.len(),
                    "proceeding on an under-replicated replica set"
                );
            }

            let deadline = Instant::now() + per_attempt;
            match self.coordinator.execute(&request, &replicas, deadline).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    debug!(
                        keyspace = %request.keyspace,
                        attempt,
                        max_retries = self.config.max_retries,
                        %err,
                        "retrying after timeout with fresh topology"
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}
