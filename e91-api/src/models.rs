//! Request and response bodies for the protocol endpoints.

use serde::{Deserialize, Serialize};

fn default_chsh_shots() -> u64 {
    1024
}

fn default_keygen_count() -> u64 {
    50
}

fn default_attack_shots() -> u64 {
    1000
}

fn default_intercept_prob() -> f64 {
    0.5
}

/// Body for `POST /api/phase1/chsh`.
#[derive(Debug, Deserialize)]
pub struct ChshRequest {
    /// Repetitions per angle pair.
    #[serde(default = "default_chsh_shots")]
    pub shots: u64,
}

/// Body for `POST /api/phase2/keygen`.
#[derive(Debug, Deserialize)]
pub struct KeyGenRequest {
    /// Number of raw key bit candidates to produce.
    #[serde(default = "default_keygen_count")]
    pub count: u64,
}

/// Body for `POST /api/phase3/attack`.
#[derive(Debug, Deserialize)]
pub struct AttackRequest {
    #[serde(default = "default_attack_shots")]
    pub shots: u64,
    #[serde(default = "default_intercept_prob")]
    pub intercept_prob: f64,
}

/// Response for `POST /api/phase1/chsh`.
#[derive(Debug, Serialize)]
pub struct ChshResponse {
    pub s_value: f64,
    pub correlations: [f64; 4],
    pub violation: bool,
}

/// Response for `POST /api/phase3/attack`.
#[derive(Debug, Serialize)]
pub struct AttackResponse {
    pub s_value: f64,
    pub correlations: [f64; 4],
    pub is_secure: bool,
    pub eve_active: bool,
}

/// JSON error body for rejected or failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
