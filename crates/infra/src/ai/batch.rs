use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use salesight_ai::{AnalyticsInsights, DegradedReason, InsightClient, InsightOutcome, InventoryInsights};
use salesight_inventory::Product;
use salesight_sales::Sale;

use crate::ai::board::BatchTicket;

/// One concurrent group of the three dashboard insight calls.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightBatch {
    pub generation: u64,
    pub analytics: InsightOutcome<AnalyticsInsights>,
    pub inventory: InsightOutcome<InventoryInsights>,
    pub prediction: InsightOutcome<String>,
    pub completed_at: DateTime<Utc>,
}

impl InsightBatch {
    pub fn is_fully_live(&self) -> bool {
        self.analytics.is_live() && self.inventory.is_live() && self.prediction.is_live()
    }

    /// Distinct fallback reasons, in call order.
    pub fn degraded_reasons(&self) -> Vec<DegradedReason> {
        let mut reasons = Vec::new();
        for r in [self.analytics.reason(), self.inventory.reason(), self.prediction.reason()]
            .into_iter()
            .flatten()
        {
            if !reasons.contains(&r) {
                reasons.push(r);
            }
        }
        reasons
    }
}

/// Issue the three insight calls concurrently and wait for all of them.
pub async fn run_batch(
    client: &InsightClient,
    ticket: BatchTicket,
    products: &[Product],
    sales: &[Sale],
) -> InsightBatch {
    let (analytics, inventory, prediction) = tokio::join!(
        client.analytics_insights(sales, products),
        client.inventory_insights(products),
        client.sales_prediction(sales),
    );

    let batch = InsightBatch {
        generation: ticket.generation(),
        analytics,
        inventory,
        prediction,
        completed_at: Utc::now(),
    };

    info!(
        generation = batch.generation,
        live = batch.is_fully_live(),
        degraded = ?batch.degraded_reasons(),
        "insight batch completed"
    );

    batch
}
