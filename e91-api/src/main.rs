//! E91 QKD Simulator API server.
//!
//! Exposes the three protocol phases over HTTP/JSON:
//!
//! - `POST /api/phase1/chsh`   - CHSH verification (entanglement witness)
//! - `POST /api/phase2/keygen` - raw key generation (bases + bits, unsifted)
//! - `POST /api/phase3/attack` - intercept-resend eavesdropper simulation
//!
//! Non-API paths fall back to static-file serving so the web frontend can be
//! mounted alongside the API. CORS is permissive, matching the frontend's
//! any-origin access pattern.

mod handlers;
mod models;
mod routes;

use clap::Parser;
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};

#[derive(Parser)]
#[command(name = "e91-api")]
#[command(about = "HTTP API server for the E91 QKD simulator", long_about = None)]
struct Args {
    /// Host to bind to
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "E91_API_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000, env = "E91_API_PORT")]
    port: u16,

    /// Directory served for non-API paths (the web frontend)
    #[arg(long, default_value = ".", env = "E91_API_STATIC_DIR")]
    static_dir: String,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = routes::create_router(&args.static_dir).layer(cors);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .expect("invalid bind address");

    log::info!("E91 QKD simulator API listening on http://{}", addr);
    log::info!("  POST /api/phase1/chsh   - CHSH verification");
    log::info!("  POST /api/phase2/keygen - raw key generation");
    log::info!("  POST /api/phase3/attack - eavesdropper simulation");
    log::info!("  static fallback dir: {}", args.static_dir);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("failed to bind listener");
    axum::serve(listener, app).await.expect("server error");
}
