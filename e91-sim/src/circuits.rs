//! The three circuit templates the protocol runs.
//!
//! Each template is a fixed composition of state-vector operations; the
//! orchestrators in [`crate::protocol`] choose angles and shot counts.

use rand::Rng;

use crate::error::SimResult;
use crate::sampler::Sampler;
use crate::state::{Outcome, Particle, TwoQubitState};

/// Basis-angle candidates Alice draws from during key generation (degrees).
pub const ALICE_BASES: [u32; 3] = [0, 45, 90];

/// Basis-angle candidates Bob draws from during key generation (degrees).
pub const BOB_BASES: [u32; 3] = [45, 90, 135];

/// Basis-angle candidates Eve draws from when intercepting (degrees).
pub const EVE_BASES: [u32; 3] = [0, 45, 90];

/// Uniform draw from a basis candidate set.
pub fn choose_basis<R: Rng + ?Sized>(candidates: &[u32], rng: &mut R) -> u32 {
    candidates[rng.gen_range(0..candidates.len())]
}

/// Pre-measurement state of the CHSH circuit and of the sifting circuit:
/// Bell pair, then each party rotated into its measurement basis.
pub fn measurement_state(theta_a: f64, theta_b: f64) -> TwoQubitState {
    TwoQubitState::prepare_entangled()
        .rotate_basis(Particle::Alice, theta_a)
        .rotate_basis(Particle::Bob, theta_b)
}

/// Intercept-resend variant: Eve measures both particles in her own basis,
/// collapsing the pair, then resends a fresh separable state carrying the
/// classical bits she observed. Returns the pre-measurement state the
/// legitimate parties end up measuring; their outcome is drawn from this,
/// never from Eve's intermediate measurement.
pub fn intercept_resend<S: Sampler, R: Rng + ?Sized>(
    theta_a: f64,
    theta_b: f64,
    eve_angle: f64,
    sampler: &mut S,
    rng: &mut R,
) -> SimResult<TwoQubitState> {
    let tapped = measurement_state(eve_angle, eve_angle);
    let eavesdropped: Outcome = sampler.sample_once(&tapped, rng)?;

    // Resend: fresh |00⟩, bit-flipped to match Eve's observed bits.
    let mut resent = TwoQubitState::zero();
    if eavesdropped.alice == 1 {
        resent = resent.bit_flip(Particle::Alice);
    }
    if eavesdropped.bob == 1 {
        resent = resent.bit_flip(Particle::Bob);
    }

    Ok(resent
        .rotate_basis(Particle::Alice, theta_a)
        .rotate_basis(Particle::Bob, theta_b))
}
