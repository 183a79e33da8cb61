//! # e91-sim
//!
//! Simulator for the E91 entanglement-based quantum key distribution
//! protocol: Bell-pair preparation, basis-rotated measurement, CHSH
//! entanglement verification, raw key generation, and an intercept-resend
//! eavesdropper model.
//!
//! ## Physics
//!
//! - **Phase 1 (CHSH)**: repeated measurement of |Φ+⟩ = (|00⟩+|11⟩)/√2 under
//!   four canonical angle pairs yields S = |E1 − E2 + E3 + E4| → 2√2 ≈ 2.828,
//!   violating the classical bound S ≤ 2.
//! - **Phase 2 (key generation)**: per shot, Alice and Bob each rotate into a
//!   randomly chosen basis and measure; raw bases and bits are returned for
//!   caller-side sifting.
//! - **Phase 3 (attack)**: Eve measures in a random basis (collapsing the
//!   pair) and resends the classical bits she saw. As her intercept
//!   probability rises, S drops into the classical regime and the violation
//!   that witnesses security disappears.
//!
//! ## Usage
//!
//! ```
//! use e91_sim::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut sampler = StateSampler;
//! let report = verify_chsh(&ChshConfig { shots: 1024 }, &mut sampler, &mut rng).unwrap();
//! println!("S = {:.3}, violation: {}", report.s_value, report.violation);
//! ```

pub mod circuits;
pub mod correlation;
pub mod error;
pub mod protocol;
pub mod sampler;
pub mod state;

#[cfg(test)]
mod tests;

pub mod prelude {
    pub use crate::circuits::*;
    pub use crate::correlation::*;
    pub use crate::error::*;
    pub use crate::protocol::*;
    pub use crate::sampler::*;
    pub use crate::state::*;
}
