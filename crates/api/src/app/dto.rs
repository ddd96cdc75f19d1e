use serde::{Deserialize, Serialize};

use salesight_infra::ai::{BatchTicket, InsightBatch};
use salesight_inventory::Product;
use salesight_sales::Sale;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct ReplaceDatasetRequest {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    pub context: String,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct BatchAccepted {
    pub generation: u64,
}

impl From<BatchTicket> for BatchAccepted {
    fn from(ticket: BatchTicket) -> Self {
        Self {
            generation: ticket.generation(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub products: usize,
    pub sales: usize,
    pub low_stock: usize,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse<'a> {
    pub loading: bool,
    pub live: bool,
    pub batch: &'a InsightBatch,
}
