//! Consistency levels and required-acknowledgment arithmetic.
//!
//! A consistency level is a closed variant set; each variant knows how to
//! compute the number of replica acknowledgments an operation needs. There
//! is no runtime string dispatch anywhere in the hot path.
//!
//! Read-your-write visibility holds when the read and write levels together
//! cover more than the replication factor (e.g. `Quorum` + `Quorum`, or
//! either side at `All`). This is documented, not enforced: callers pick
//! levels per operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-operation consistency level.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum ConsistencyLevel {
    /// One replica, anywhere.
    One,
    /// Majority of all replicas.
    Quorum,
    /// Every replica.
    All,
    /// Majority of the replicas in the coordinator's datacenter.
    LocalQuorum,
    /// One replica in the coordinator's datacenter.
    LocalOne,
}

impl ConsistencyLevel {
    /// Number of acknowledgments required for a replica set of
    /// `replica_count` nodes, of which `local_count` are in the
    /// coordinator's datacenter.
    ///
    /// Quorum is `floor(n/2) + 1`: any two majorities overlap in at least
    /// one replica.
    pub fn required_acks(&self, replica_count: usize, local_count: usize) -> usize {
        match self {
            ConsistencyLevel::One => 1,
            ConsistencyLevel::Quorum => replica_count / 2 + 1,
            ConsistencyLevel::All => replica_count,
            ConsistencyLevel::LocalQuorum => local_count / 2 + 1,
            ConsistencyLevel::LocalOne => 1,
        }
    }

    /// True for levels that only count acknowledgments from the
    /// coordinator's local datacenter.
    pub fn is_local(&self) -> bool {
        matches!(self, ConsistencyLevel::LocalQuorum | ConsistencyLevel::LocalOne)
    }
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsistencyLevel::One => "ONE",
            ConsistencyLevel::Quorum => "QUORUM",
            ConsistencyLevel::All => "ALL",
            ConsistencyLevel::LocalQuorum => "LOCAL_QUORUM",
            ConsistencyLevel::LocalOne => "LOCAL_ONE",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConsistencyLevel::*;

    #[test]
    fn test_quorum_arithmetic() {
        assert_eq!(Quorum.required_acks(1, 1), 1);
        assert_eq!(Quorum.required_acks(2, 2), 2);
        assert_eq!(Quorum.required_acks(3, 3), 2);
        assert_eq!(Quorum.required_acks(4, 4), 3);
        assert_eq!(Quorum.required_acks(5, 5), 3);
    }

    #[test]
    fn test_one_and_all() {
        assert_eq!(One.required_acks(3, 3), 1);
        assert_eq!(All.required_acks(3, 3), 3);
        assert_eq!(All.required_acks(5, 2), 5);
    }

    #[test]
    fn test_local_levels_use_local_count() {
        // 4 replicas total, 2 in the local datacenter.
        assert_eq!(LocalQuorum.required_acks(4, 2), 2);
        assert_eq!(LocalOne.required_acks(4, 2), 1);
        assert!(LocalQuorum.is_local());
        assert!(LocalOne.is_local());
        assert!(!Quorum.is_local());
    }

    #[test]
    fn test_display_names() {
        assert_eq!(LocalQuorum.to_string(), "LOCAL_QUORUM");
        assert_eq!(Quorum.to_string(), "QUORUM");
    }
}
