use axum::{Router, routing::get};

pub mod dataset;
pub mod insights;
pub mod system;

/// Router for the dashboard endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/dataset", get(dataset::get_dataset).put(dataset::replace_dataset))
        .nest("/insights", insights::router())
}
