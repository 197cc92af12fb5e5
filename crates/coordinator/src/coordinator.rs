//! Quorum fan-out and response aggregation.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tokio::time::Instant;
use tracing::debug;

use corelib::node::{Node, NodeId};
use replication::ReplicaSet;

use crate::engine::{NodeResponse, StorageEngine};
use crate::error::CoordinatorError;
use crate::request::{OperationOutcome, OperationRequest, ReplicaAck, Row};

/// Dispatches one operation to a replica set and aggregates the result
/// against the requested consistency level.
///
/// Fan-out is concurrent: futures are pushed un-spawned into a
/// [`FuturesUnordered`], so once the required acknowledgment count is met
/// the whole set is dropped and stragglers are cancelled at their next
/// suspension point; they are never awaited past success.
pub struct ConsistencyCoordinator {
    engine: Arc<dyn StorageEngine>,
    local_datacenter: String,
}

impl ConsistencyCoordinator {
    pub fn new(engine: Arc<dyn StorageEngine>, local_datacenter: impl Into<String>) -> Self {
        Self {
            engine,
            local_datacenter: local_datacenter.into(),
        }
    }

    pub fn local_datacenter(&self) -> &str {
        &self.local_datacenter
    }

    /// Execute `request` against `replicas`, finishing by `deadline`.
    ///
    /// For `Local*` consistency levels only replicas in the coordinator's
    /// datacenter count toward (and against) the requirement; writes are
    /// still dispatched to every replica so remote datacenters receive
    /// them. Reads are dispatched primary-first, which gives the preferred
    /// replica the best chance to supply the authoritative row.
    pub async fn execute(
        &self,
        request: &OperationRequest,
        replicas: &ReplicaSet,
        deadline: Instant,
    ) -> Result<OperationOutcome, CoordinatorError> {
        let level = request.consistency;
        let local_count = replicas.nodes_in_datacenter(&self.local_datacenter).len();
        let required = level.required_acks(replicas.len(), local_count);

        if replicas.is_empty() {
            return Err(CoordinatorError::Unavailable {
                required: required.max(1),
                alive: 0,
            });
        }

        let counts_toward_quorum = |node: &Node| -> bool {
            !level.is_local() || node.datacenter == self.local_datacenter
        };

        // Pre-flight: if the live counted replicas cannot reach the
        // requirement, fail before dispatching anything.
        let counted_len = replicas
            .iter()
            .filter(|n| counts_toward_quorum(n))
            .count();
        let alive = replicas
            .iter()
            .filter(|n| counts_toward_quorum(n) && n.is_up())
            .count();
        if alive < required {
            return Err(CoordinatorError::Unavailable { required, alive });
        }
        let tolerable = counted_len - required;

        // Dispatch order: reads go to counted replicas only, primary first.
        // Writes go everywhere (counted first) so remote datacenters are
        // kept current even when their acks are not awaited.
        let mut targets: Vec<(&Node, bool)> = Vec::with_capacity(replicas.len());
        for node in replicas.iter().filter(|n| counts_toward_quorum(n)) {
            targets.push((node, true));
        }
        if request.kind.is_write() {
            for node in replicas.iter().filter(|n| !counts_toward_quorum(n)) {
                targets.push((node, false));
            }
        }

        let rank: HashMap<NodeId, usize> = replicas
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, i))
            .collect();

        debug!(
            kind = ?request.kind,
            consistency = %level,
            replicas = replicas.len(),
            required,
            alive,
            "dispatching operation"
        );

        let mut futs: FuturesUnordered<_> = targets
            .into_iter()
            .map(|(node, counted)| {
                let engine = Arc::clone(&self.engine);
                let node = node.clone();
                async move {
                    let result = engine.execute_on_node(&node, request).await;
                    (node.id, counted, result)
                }
            })
            .collect();

        let mut acks: Vec<ReplicaAck> = Vec::with_capacity(replicas.len());
        let mut successes = 0usize;
        let mut failures = 0usize;
        // Best read row so far: (timestamp, replica rank) picks the newest
        // version, ties broken toward the earlier replica in set order.
        let mut best: Option<(i64, usize, Row)> = None;

        loop {
            let next = match tokio::time::timeout_at(deadline, futs.next()).await {
                Err(_) => {
                    return Err(CoordinatorError::Timeout {
                        required,
                        achieved: successes,
                    })
                }
                Ok(None) => break,
                Ok(Some(item)) => item,
            };

            let (node_id, counted, result) = next;
            match result {
                Ok(response) => {
                    acks.push(ReplicaAck {
                        node: node_id,
                        result: Ok(()),
                    });
                    if request.kind.is_read() {
                        self.merge_read(&mut best, &rank, node_id, response);
                    }
                    if counted {
                        successes += 1;
                        if successes >= required {
                            break;
                        }
                    }
                }
                Err(err) => {
                    acks.push(ReplicaAck {
                        node: node_id,
                        result: Err(err.to_string()),
                    });
                    if counted {
                        failures += 1;
                        if failures > tolerable {
                            return Err(self.rejection_error(request, required, failures, tolerable));
                        }
                    }
                }
            }
        }

        if successes < required {
            // Exhausted without the counted set reaching quorum; the
            // tolerance check above makes this unreachable in practice.
            return Err(self.rejection_error(request, required, failures, tolerable));
        }

        // Dropping `futs` cancels any in-flight stragglers.
        drop(futs);

        Ok(OperationOutcome {
            required,
            achieved: successes,
            acks,
            row: best.map(|(_, _, row)| row),
        })
    }

    fn merge_read(
        &self,
        best: &mut Option<(i64, usize, Row)>,
        rank: &HashMap<NodeId, usize>,
        node_id: NodeId,
        response: NodeResponse,
    ) {
        let Some(row) = response.row else {
            return;
        };
        let node_rank = rank.get(&node_id).copied().unwrap_or(usize::MAX);
        let newer = match best {
            None => true,
            Some((ts, r, _)) => {
                row.timestamp_micros > *ts || (row.timestamp_micros == *ts && node_rank < *r)
            }
        };
        if newer {
            *best = Some((row.timestamp_micros, node_rank, row));
        }
    }

    fn rejection_error(
        &self,
        request: &OperationRequest,
        required: usize,
        failures: usize,
        tolerable: usize,
    ) -> CoordinatorError {
        if request.kind.is_read() {
            CoordinatorError::ReadFailure {
                required,
                failures,
                tolerable,
            }
        } else {
            CoordinatorError::WriteFailure {
                required,
                failures,
                tolerable,
            }
        }
    }
}
