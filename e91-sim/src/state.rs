//! Two-particle state vector and the gate set the protocol needs.
//!
//! The state of the entangled pair is four complex amplitudes indexed by the
//! joint outcome label. The bit-order convention is fixed here, once, and
//! every other module goes through [`Outcome`] instead of computing indices:
//!
//! ```text
//! index = alice_bit << 1 | bob_bit
//!
//! amps[0] = ⟨00|ψ⟩   (Alice 0, Bob 0)
//! amps[1] = ⟨01|ψ⟩   (Alice 0, Bob 1)
//! amps[2] = ⟨10|ψ⟩   (Alice 1, Bob 0)
//! amps[3] = ⟨11|ψ⟩   (Alice 1, Bob 1)
//! ```

use num_complex::Complex;
use num_traits::Zero;

use crate::error::{SimResult, SimulationError};

/// Tolerance for the Σ|amp|² ≈ 1 normalization invariant.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// A single-particle 2x2 matrix stored as [row0col0, row0col1, row1col0, row1col1].
pub type Matrix2x2 = [Complex<f64>; 4];

/// Which half of the entangled pair a single-particle gate acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Particle {
    Alice,
    Bob,
}

/// One joint measurement outcome: a bit per party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Alice's bit (0 or 1).
    pub alice: u8,
    /// Bob's bit (0 or 1).
    pub bob: u8,
}

impl Outcome {
    pub fn new(alice: u8, bob: u8) -> Self {
        debug_assert!(alice <= 1 && bob <= 1);
        Self { alice, bob }
    }

    /// Amplitude index of this outcome under the crate-wide bit order.
    pub fn index(self) -> usize {
        ((self.alice << 1) | self.bob) as usize
    }

    /// Inverse of [`Outcome::index`]. Only the low two bits are meaningful.
    pub fn from_index(index: usize) -> Self {
        Self {
            alice: ((index >> 1) & 1) as u8,
            bob: (index & 1) as u8,
        }
    }

    /// True when both parties saw the same bit.
    pub fn is_same(self) -> bool {
        self.alice == self.bob
    }
}

/// Normalized state vector of the two-particle system.
///
/// Gates consume and return the state, so circuit definitions read as
/// left-to-right chains of operations.
#[derive(Debug, Clone, PartialEq)]
pub struct TwoQubitState {
    amps: [Complex<f64>; 4],
}

impl TwoQubitState {
    /// The |00⟩ initial state every circuit starts from.
    pub fn zero() -> Self {
        let mut amps = [Complex::zero(); 4];
        amps[0] = Complex::new(1.0, 0.0);
        Self { amps }
    }

    /// The basis state a measurement with the given outcome collapses to.
    pub fn basis_state(outcome: Outcome) -> Self {
        let mut amps = [Complex::zero(); 4];
        amps[outcome.index()] = Complex::new(1.0, 0.0);
        Self { amps }
    }

    /// The Bell state |Φ+⟩ = (|00⟩ + |11⟩)/√2, built the way the protocol
    /// prescribes: Hadamard on Alice's particle, then CNOT Alice→Bob.
    pub fn prepare_entangled() -> Self {
        Self::zero().hadamard(Particle::Alice).cnot_alice_bob()
    }

    /// Raw amplitudes in the crate-wide index order.
    pub fn amplitudes(&self) -> &[Complex<f64>; 4] {
        &self.amps
    }

    /// Apply a single-particle matrix to the chosen half of the pair.
    fn apply_one_particle(mut self, m: Matrix2x2, particle: Particle) -> Self {
        // Index pairs that differ only in the chosen particle's bit.
        let pairs = match particle {
            Particle::Alice => [(0usize, 2usize), (1, 3)],
            Particle::Bob => [(0, 1), (2, 3)],
        };
        for (i0, i1) in pairs {
            let a0 = self.amps[i0];
            let a1 = self.amps[i1];
            self.amps[i0] = m[0] * a0 + m[1] * a1;
            self.amps[i1] = m[2] * a0 + m[3] * a1;
        }
        self
    }

    /// Hadamard gate on one particle.
    #[must_use]
    pub fn hadamard(self, particle: Particle) -> Self {
        let h = Complex::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
        self.apply_one_particle([h, h, h, -h], particle)
    }

    /// Controlled-NOT with Alice as control and Bob as target: flips Bob's
    /// bit on the amplitudes where Alice's bit is 1.
    #[must_use]
    pub fn cnot_alice_bob(mut self) -> Self {
        self.amps.swap(2, 3);
        self
    }

    /// Unconditional bit flip (Pauli X) on one particle.
    #[must_use]
    pub fn bit_flip(mut self, particle: Particle) -> Self {
        match particle {
            Particle::Alice => {
                self.amps.swap(0, 2);
                self.amps.swap(1, 3);
            }
            Particle::Bob => {
                self.amps.swap(0, 1);
                self.amps.swap(2, 3);
            }
        }
        self
    }

    /// Rotate one particle's measurement basis by `theta_degrees`.
    ///
    /// Convention: a basis angle of θ degrees applies the unitary
    /// Ry(−2·θ·π/180), so that measuring the rotated state in the
    /// computational basis is equivalent to measuring the original state
    /// along the θ-degree axis. Same convention as the downstream
    /// correlation math: E(θ_A, θ_B) = cos 2(θ_A − θ_B) on |Φ+⟩.
    #[must_use]
    pub fn rotate_basis(self, particle: Particle, theta_degrees: f64) -> Self {
        // Ry(φ) = [[cos φ/2, −sin φ/2], [sin φ/2, cos φ/2]] with φ = −2θ.
        let theta = theta_degrees.to_radians();
        let (sin, cos) = theta.sin_cos();
        let m = [
            Complex::new(cos, 0.0),
            Complex::new(sin, 0.0),
            Complex::new(-sin, 0.0),
            Complex::new(cos, 0.0),
        ];
        self.apply_one_particle(m, particle)
    }

    /// Total probability mass Σ|amp|².
    pub fn norm_sqr(&self) -> f64 {
        self.amps.iter().map(|a| a.norm_sqr()).sum()
    }

    /// |amplitude|² per joint outcome label, in [`Outcome::index`] order.
    ///
    /// Fails with [`SimulationError::NotNormalized`] when the invariant
    /// Σ|amp|² ≈ 1 is broken; unitary evolution never triggers this.
    pub fn probabilities(&self) -> SimResult<[f64; 4]> {
        let norm_sqr = self.norm_sqr();
        // Negated <= rather than > so a NaN norm is also rejected.
        if !((norm_sqr - 1.0).abs() <= NORM_TOLERANCE) {
            return Err(SimulationError::NotNormalized(norm_sqr));
        }
        Ok([
            self.amps[0].norm_sqr(),
            self.amps[1].norm_sqr(),
            self.amps[2].norm_sqr(),
            self.amps[3].norm_sqr(),
        ])
    }
}
