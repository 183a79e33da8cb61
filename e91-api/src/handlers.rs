//! Request handlers for the three protocol phases.
//!
//! Each handler validates its input, runs the corresponding orchestrator
//! with a fresh per-request generator (no shared mutable RNG across
//! concurrent requests), and maps core errors onto HTTP statuses.

use axum::{http::StatusCode, Json};
use rand::rngs::StdRng;
use rand::SeedableRng;

use e91_sim::prelude::*;

use crate::models::*;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorBody>)>;

/// Round to 4 decimals for response bodies; the core stays full precision.
fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn bad_request(message: impl Into<String>) -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
}

/// Invalid input is the caller's fault; anything else is an internal error.
fn core_error(err: SimulationError) -> (StatusCode, Json<ErrorBody>) {
    let status = if err.is_invalid_input() {
        StatusCode::BAD_REQUEST
    } else {
        log::error!("simulation failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
}

pub async fn chsh_handler(Json(request): Json<ChshRequest>) -> ApiResult<ChshResponse> {
    if request.shots == 0 {
        return Err(bad_request("shots must be a positive integer"));
    }

    let mut rng = StdRng::from_entropy();
    let config = ChshConfig {
        shots: request.shots,
    };
    let report = verify_chsh(&config, &mut StateSampler, &mut rng).map_err(core_error)?;

    log::info!(
        "phase1 chsh: shots={} S={:.4} violation={}",
        request.shots,
        report.s_value,
        report.violation
    );

    Ok(Json(ChshResponse {
        s_value: round4(report.s_value),
        correlations: report.correlations.map(round4),
        violation: report.violation,
    }))
}

pub async fn keygen_handler(Json(request): Json<KeyGenRequest>) -> ApiResult<RawKeyMaterial> {
    if request.count == 0 {
        return Err(bad_request("count must be a positive integer"));
    }

    let mut rng = StdRng::from_entropy();
    let config = KeyGenConfig {
        count: request.count,
    };
    let material = generate_raw_key(&config, &mut StateSampler, &mut rng).map_err(core_error)?;

    log::info!("phase2 keygen: count={}", request.count);

    Ok(Json(material))
}

pub async fn attack_handler(Json(request): Json<AttackRequest>) -> ApiResult<AttackResponse> {
    if request.shots == 0 {
        return Err(bad_request("shots must be a positive integer"));
    }
    if !(0.0..=1.0).contains(&request.intercept_prob) {
        return Err(bad_request("intercept_prob must lie in [0, 1]"));
    }

    let mut rng = StdRng::from_entropy();
    let config = AttackConfig {
        shots: request.shots,
        intercept_prob: request.intercept_prob,
    };
    let report =
        simulate_intercept_resend(&config, &mut StateSampler, &mut rng).map_err(core_error)?;

    log::info!(
        "phase3 attack: shots={} intercept_prob={} S={:.4} secure={}",
        request.shots,
        request.intercept_prob,
        report.s_value,
        report.is_secure
    );

    Ok(Json(AttackResponse {
        s_value: round4(report.s_value),
        correlations: report.correlations,
        is_secure: report.is_secure,
        eve_active: report.eve_active,
    }))
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
