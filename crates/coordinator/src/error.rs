//! Failure taxonomy for coordinated operations.
//!
//! Every failure is surfaced to the CRUD caller as a typed error; nothing
//! is swallowed. Retry policy lives in the executor and keys off the
//! variant: timeouts are retryable with fresh topology, unavailability is
//! not (it needs a topology change, not another attempt), and replica-side
//! rejections may be non-transient so they are handed straight back.

use replication::ReplicationError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoordinatorError {
    /// Not enough live replicas to even attempt the requested consistency.
    #[error("unavailable: {required} replicas required, {alive} alive")]
    Unavailable { required: usize, alive: usize },

    /// Deadline expired before the required acknowledgments arrived.
    #[error("timed out: {achieved} of {required} required acks")]
    Timeout { required: usize, achieved: usize },

    /// Replica-side read rejections exceeded the tolerable failure count.
    #[error("read failed: {failures} replica failures, {tolerable} tolerable (required {required})")]
    ReadFailure {
        required: usize,
        failures: usize,
        tolerable: usize,
    },

    /// Replica-side write rejections exceeded the tolerable failure count.
    #[error("write failed: {failures} replica failures, {tolerable} tolerable (required {required})")]
    WriteFailure {
        required: usize,
        failures: usize,
        tolerable: usize,
    },

    /// Replica resolution failed before any dispatch.
    #[error(transparent)]
    Resolution(#[from] ReplicationError),
}

impl CoordinatorError {
    /// True for failures the executor may retry (with re-resolution).
    pub fn is_retryable(&self) -> bool {
        matches!(self, CoordinatorError::Timeout { .. })
    }
}
