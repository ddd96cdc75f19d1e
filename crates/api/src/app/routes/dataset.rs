use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use salesight_inventory::low_stock;

use crate::app::dto;
use crate::app::services::AppServices;

pub async fn get_dataset(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    let dataset = services.dataset();
    Json(dto::DatasetSummary {
        products: dataset.products.len(),
        sales: dataset.sales.len(),
        low_stock: low_stock(&dataset.products).len(),
    })
}

/// Replace products and sales; a new insight batch starts for the new data.
pub async fn replace_dataset(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ReplaceDatasetRequest>,
) -> axum::response::Response {
    match services.replace_dataset(body.products, body.sales) {
        Some(ticket) => (StatusCode::ACCEPTED, Json(dto::BatchAccepted::from(ticket))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
