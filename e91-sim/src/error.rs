//! Error types for the protocol engine.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimulationError>;

/// Errors raised by the simulation core.
///
/// Invalid-input variants are rejected before any simulation work begins;
/// the remaining variants are internal failures and are never retried,
/// since the underlying numerics are deterministic.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Shot and pair counts must be positive.
    #[error("shot count must be positive (got {0})")]
    InvalidShots(u64),

    /// Intercept probability must lie in [0, 1]. NaN is rejected too.
    #[error("intercept probability must lie in [0, 1] (got {0})")]
    InvalidProbability(f64),

    /// A probabilistic draw could not be completed.
    #[error("sampling failed: {0}")]
    Sampling(String),

    /// Defensive normalization check: the state's total probability mass
    /// drifted outside tolerance. Should never fire for unitary evolution.
    #[error("state is not normalized: total probability {0}")]
    NotNormalized(f64),
}

impl SimulationError {
    /// True for errors caused by caller input rather than internal failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SimulationError::InvalidShots(_) | SimulationError::InvalidProbability(_)
        )
    }
}
