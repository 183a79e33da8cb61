//! Cross-module protocol tests, driven by a scripted sampler where the
//! statistics must be pinned exactly and by seeded generators elsewhere.

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

use crate::correlation::CHSH_ANGLE_PAIRS;
use crate::error::{SimResult, SimulationError};
use crate::prelude::*;

/// Test double for [`Sampler`]: `sample_counts` pops pre-scripted batch
/// counts, `sample_once` cycles through a pre-scripted outcome sequence.
struct ScriptedSampler {
    batches: Vec<OutcomeCounts>,
    batch_calls: usize,
    outcomes: Vec<Outcome>,
    outcome_calls: usize,
}

impl ScriptedSampler {
    fn with_batches(batches: Vec<OutcomeCounts>) -> Self {
        Self {
            batches,
            batch_calls: 0,
            outcomes: Vec::new(),
            outcome_calls: 0,
        }
    }

    fn with_outcomes(outcomes: Vec<Outcome>) -> Self {
        Self {
            batches: Vec::new(),
            batch_calls: 0,
            outcomes,
            outcome_calls: 0,
        }
    }
}

impl Sampler for ScriptedSampler {
    fn sample_once<R: Rng + ?Sized>(
        &mut self,
        _state: &TwoQubitState,
        _rng: &mut R,
    ) -> SimResult<Outcome> {
        let outcome = self.outcomes[self.outcome_calls % self.outcomes.len()];
        self.outcome_calls += 1;
        Ok(outcome)
    }

    fn sample_counts<R: Rng + ?Sized>(
        &mut self,
        _state: &TwoQubitState,
        shots: u64,
        _rng: &mut R,
    ) -> SimResult<OutcomeCounts> {
        if shots == 0 {
            return Err(SimulationError::InvalidShots(shots));
        }
        let counts = self.batches[self.batch_calls % self.batches.len()];
        self.batch_calls += 1;
        Ok(counts)
    }
}

#[test]
fn chsh_with_scripted_counts_pins_the_statistic() {
    // Counts in Outcome::index order [(0,0), (0,1), (1,0), (1,1)]:
    // pair 1 all-same, pair 2 all-different, pairs 3 and 4 all-same
    // → correlations [1, −1, 1, 1] → S = |1 − (−1) + 1 + 1| = 4.
    let shots = 80;
    let mut sampler = ScriptedSampler::with_batches(vec![
        OutcomeCounts::from_counts([shots, 0, 0, 0]),
        OutcomeCounts::from_counts([0, shots, 0, 0]),
        OutcomeCounts::from_counts([shots, 0, 0, 0]),
        OutcomeCounts::from_counts([shots, 0, 0, 0]),
    ]);
    let mut rng = StdRng::seed_from_u64(0);

    let report = verify_chsh(&ChshConfig { shots }, &mut sampler, &mut rng).unwrap();
    assert_eq!(report.correlations, [1.0, -1.0, 1.0, 1.0]);
    assert_eq!(report.s_value, 4.0);
    assert!(report.violation);
    assert_eq!(sampler.batch_calls, CHSH_ANGLE_PAIRS.len());
}

#[test]
fn attack_with_scripted_balanced_outcomes_lands_on_the_bound() {
    // intercept_prob = 1 makes every pair take the per-shot path, which
    // draws two outcomes per shot: Eve's, then the legitimate parties'.
    // Cycling four scripted outcomes hands Eve (0,0) every time and the
    // parties alternating (0,1)/(1,0): balanced disagreement, so every
    // pair correlates at -1 and S = |-1 - (-1) + (-1) + (-1)| = 2.
    let mut sampler = ScriptedSampler::with_outcomes(vec![
        Outcome::new(0, 0),
        Outcome::new(0, 1),
        Outcome::new(0, 0),
        Outcome::new(1, 0),
    ]);
    let mut rng = StdRng::seed_from_u64(0);
    let config = AttackConfig {
        shots: 100,
        intercept_prob: 1.0,
    };

    let report = simulate_intercept_resend(&config, &mut sampler, &mut rng).unwrap();
    assert_eq!(report.correlations, [-1.0, -1.0, -1.0, -1.0]);
    assert_eq!(report.s_value, 2.0);
    assert!(!report.is_secure);
    assert!(report.eve_active);
    // Two draws per shot, every shot of every pair on the attacked path.
    assert_eq!(sampler.outcome_calls, 2 * 100 * 4);
}

#[test]
fn every_operation_rejects_zero_work() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut sampler = StateSampler;

    assert!(verify_chsh(&ChshConfig { shots: 0 }, &mut sampler, &mut rng)
        .unwrap_err()
        .is_invalid_input());
    assert!(
        generate_raw_key(&KeyGenConfig { count: 0 }, &mut sampler, &mut rng)
            .unwrap_err()
            .is_invalid_input()
    );
    let config = AttackConfig {
        shots: 10,
        intercept_prob: 1.5,
    };
    assert!(
        simulate_intercept_resend(&config, &mut sampler, &mut rng)
            .unwrap_err()
            .is_invalid_input()
    );
}

#[test]
fn chsh_estimate_tightens_with_shot_count() {
    // Mean absolute deviation from 2√2, averaged over a few seeds, must
    // shrink as shots grow (statistical convergence of the estimator).
    let target = 2.0 * std::f64::consts::SQRT_2;
    let mean_error = |shots: u64| {
        let seeds = [101u64, 202, 303];
        let total: f64 = seeds
            .iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let report = verify_chsh(&ChshConfig { shots }, &mut StateSampler, &mut rng)
                    .unwrap();
                (report.s_value - target).abs()
            })
            .sum();
        total / seeds.len() as f64
    };

    let coarse = mean_error(64);
    let medium = mean_error(4096);
    let fine = mean_error(262_144);
    assert!(
        coarse > medium && medium > fine,
        "errors did not shrink: {} / {} / {}",
        coarse,
        medium,
        fine
    );
}
