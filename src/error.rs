//! Error taxonomy for the allocation optimizer.

use thiserror::Error;

/// Precondition failures surfaced to the caller before any search work
/// begins. None of these are retried, and no partial output is produced
/// when one is raised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptimizeError {
    /// The demand input is malformed or degenerate: empty, non-finite,
    /// or zero in total. There is nothing to optimize toward.
    #[error("invalid demand: {0}")]
    InvalidDemand(String),

    /// The farmer set is empty; there is no state to search over.
    #[error("cluster contains no farmers")]
    EmptyCluster,

    /// Fewer than two crops were supplied, so no neighbor move exists
    /// and the search degenerates.
    #[error("at least 2 crops are required for the search, got {found}")]
    InsufficientCrops {
        /// Number of crops in the request.
        found: usize,
    },

    /// The annealing configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failure reported by an external feasibility scorer for a single
/// (farmer, crop) pair.
///
/// Recovered locally: the adapter logs the failure and treats the pair
/// as maximally infeasible (score 0). It never aborts a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("feasibility lookup failed for farmer {farmer} / crop {crop}: {reason}")]
pub struct FeasibilityError {
    /// Identifier of the farmer the lookup was for.
    pub farmer: u64,
    /// Crop name the lookup was for.
    pub crop: String,
    /// Scorer-supplied description of the failure.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_precondition() {
        assert_eq!(
            OptimizeError::EmptyCluster.to_string(),
            "cluster contains no farmers"
        );
        assert_eq!(
            OptimizeError::InsufficientCrops { found: 1 }.to_string(),
            "at least 2 crops are required for the search, got 1"
        );
        assert!(OptimizeError::InvalidDemand("total demand is zero".into())
            .to_string()
            .contains("total demand is zero"));
    }

    #[test]
    fn test_feasibility_error_carries_the_pair() {
        let err = FeasibilityError {
            farmer: 7,
            crop: "Olive".into(),
            reason: "model timeout".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("farmer 7"));
        assert!(msg.contains("Olive"));
        assert!(msg.contains("model timeout"));
    }
}
