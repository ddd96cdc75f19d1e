//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: dataset + insight orchestration shared by handlers
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use salesight_ai::InsightClient;
use salesight_infra::ai::AcceptPolicy;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(client: InsightClient, policy: AcceptPolicy) -> Router {
    let services = Arc::new(services::AppServices::new(client, policy));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .layer(Extension(services))
}
