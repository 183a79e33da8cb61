//! Correlation coefficients and the CHSH statistic.

use crate::error::{SimResult, SimulationError};
use crate::sampler::OutcomeCounts;

/// The four canonical (θ_A, θ_B) angle pairs, in degrees, measured for the
/// CHSH statistic. Order matters: it fixes which correlation lands in which
/// slot of the S combination.
pub const CHSH_ANGLE_PAIRS: [(f64, f64); 4] =
    [(0.0, 22.5), (0.0, 67.5), (45.0, 22.5), (45.0, 67.5)];

/// Upper bound on S for any local-hidden-variable model.
pub const CLASSICAL_BOUND: f64 = 2.0;

/// Correlation coefficient E = (N_same − N_diff) / N_total in [−1, 1].
///
/// Fails with [`SimulationError::InvalidShots`] on an empty batch; a zero
/// correlation from balanced counts must stay distinguishable from a
/// division by zero.
pub fn correlation(counts: &OutcomeCounts) -> SimResult<f64> {
    let total = counts.total();
    if total == 0 {
        return Err(SimulationError::InvalidShots(total));
    }
    Ok((counts.same() as f64 - counts.different() as f64) / total as f64)
}

/// CHSH statistic S = |E1 − E2 + E3 + E4|.
///
/// The absolute value is taken once, after combining; taking |E_i| per term
/// first would change the statistic.
pub fn chsh_s(correlations: &[f64; 4]) -> f64 {
    (correlations[0] - correlations[1] + correlations[2] + correlations[3]).abs()
}

/// True when S certifies quantum correlation (CHSH violation).
pub fn violates_classical_bound(s_value: f64) -> bool {
    s_value > CLASSICAL_BOUND
}
