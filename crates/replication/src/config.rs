//! Keyspace replication configuration.
//!
//! Mirrors the two strategy classes a keyspace can be created with: uniform
//! replication across one datacenter, or an explicit per-datacenter factor
//! map. Configuration is immutable once registered for a keyspace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ReplicationError;
use crate::strategy::{NetworkTopologyStrategy, ReplicationStrategy, SimpleStrategy};

/// Keyspace-scoped replication settings.
///
/// Factors are validated to be ≥ 1 at construction. A factor larger than
/// the number of nodes currently in its datacenter is not an error here:
/// that is an under-replication condition, surfaced on every resolution
/// through [`crate::ReplicaSet::under_replicated`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplicationConfig {
    /// Uniform replication: `factor` distinct nodes, ring order.
    Simple { factor: usize },
    /// Per-datacenter replication: each datacenter gets its own factor.
    NetworkTopology { factors: BTreeMap<String, usize> },
}

impl ReplicationConfig {
    /// Uniform single-datacenter replication.
    pub fn simple(factor: usize) -> Result<Self, ReplicationError> {
        if factor < 1 {
            return Err(ReplicationError::InvalidFactor {
                scope: "keyspace".to_string(),
                factor,
            });
        }
        Ok(ReplicationConfig::Simple { factor })
    }

    /// Per-datacenter replication from `(datacenter, factor)` pairs.
    pub fn network_topology<S: Into<String>>(
        factors: impl IntoIterator<Item = (S, usize)>,
    ) -> Result<Self, ReplicationError> {
        let factors: BTreeMap<String, usize> =
            factors.into_iter().map(|(dc, f)| (dc.into(), f)).collect();
        for (dc, factor) in &factors {
            if *factor < 1 {
                return Err(ReplicationError::InvalidFactor {
                    scope: format!("datacenter {}", dc),
                    factor: *factor,
                });
            }
        }
        Ok(ReplicationConfig::NetworkTopology { factors })
    }

    /// Sum of replication factors across all datacenters.
    pub fn total_factor(&self) -> usize {
        match self {
            ReplicationConfig::Simple { factor } => *factor,
            ReplicationConfig::NetworkTopology { factors } => factors.values().sum(),
        }
    }

    /// Instantiate the strategy implementing this configuration.
    pub(crate) fn build_strategy(&self) -> Box<dyn ReplicationStrategy> {
        match self {
            ReplicationConfig::Simple { factor } => Box::new(SimpleStrategy::new(*factor)),
            ReplicationConfig::NetworkTopology { factors } => {
                Box::new(NetworkTopologyStrategy::new(factors.clone()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factor_must_be_positive() {
        assert!(ReplicationConfig::simple(0).is_err());
        assert!(ReplicationConfig::simple(3).is_ok());
        assert!(ReplicationConfig::network_topology([("us-east", 0)]).is_err());
    }

    #[test]
    fn test_total_factor() {
        let cfg = ReplicationConfig::network_topology([("us-east", 2), ("eu-west", 2)]).unwrap();
        assert_eq!(cfg.total_factor(), 4);
        assert_eq!(ReplicationConfig::simple(3).unwrap().total_factor(), 3);
    }
}
