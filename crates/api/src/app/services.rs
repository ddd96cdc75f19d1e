use std::{
    convert::Infallible,
    sync::{Arc, RwLock},
    time::Duration,
};

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use tokio_stream::{StreamExt, wrappers::WatchStream};
use tracing::{debug, info};

use salesight_ai::{InsightClient, InsightOutcome};
use salesight_infra::ai::{AcceptPolicy, BatchTicket, InsightBoard, InsightRefresher};
use salesight_inventory::Product;
use salesight_sales::Sale;

/// Products and sales currently shown on the dashboard.
///
/// Replacing the dataset swaps both collections for new ones; unchanged
/// collections keep their identity.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub products: Arc<[Product]>,
    pub sales: Arc<[Sale]>,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            products: Arc::from(Vec::new()),
            sales: Arc::from(Vec::new()),
        }
    }
}

#[derive(Debug)]
pub struct AppServices {
    refresher: Arc<InsightRefresher>,
    dataset: RwLock<Dataset>,
}

impl AppServices {
    pub fn new(client: InsightClient, policy: AcceptPolicy) -> Self {
        let board = Arc::new(InsightBoard::new(policy));
        Self {
            refresher: Arc::new(InsightRefresher::new(client, board)),
            dataset: RwLock::new(Dataset::default()),
        }
    }

    pub fn board(&self) -> &InsightBoard {
        self.refresher.board()
    }

    pub fn dataset(&self) -> Dataset {
        self.dataset
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Swap in a new dataset and start a batch for it.
    ///
    /// A collection equal to the stored one keeps its identity, so resending
    /// the same data starts no batch and returns `None`. The write guard is held
    /// until the generation is handed out, so the newest dataset always gets the
    /// newest generation.
    pub fn replace_dataset(&self, products: Vec<Product>, sales: Vec<Sale>) -> Option<BatchTicket> {
        let mut stored = self
            .dataset
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if *stored.products != *products {
            stored.products = products.into();
        }
        if *stored.sales != *sales {
            stored.sales = sales.into();
        }

        if !self.refresher.observe(&stored.products, &stored.sales) {
            debug!("dataset unchanged; no insight batch started");
            return None;
        }

        info!(products = stored.products.len(), sales = stored.sales.len(), "dataset replaced");
        let (ticket, _handle) = self
            .refresher
            .spawn_refresh(Arc::clone(&stored.products), Arc::clone(&stored.sales));
        Some(ticket)
    }

    /// Start a batch for the current dataset regardless of in-flight ones.
    pub fn refresh(&self) -> BatchTicket {
        let stored = self
            .dataset
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let (ticket, _handle) = self
            .refresher
            .spawn_refresh(Arc::clone(&stored.products), Arc::clone(&stored.sales));
        ticket
    }

    pub async fn recommendation(&self, context: &str) -> InsightOutcome<String> {
        self.refresher.client().business_recommendation(context).await
    }
}

/// SSE stream of every batch the board displays.
pub fn insights_sse_stream(
    services: Arc<AppServices>,
) -> Sse<impl tokio_stream::Stream<Item = Result<SseEvent, Infallible>>> {
    let rx = services.board().subscribe();
    let stream = WatchStream::new(rx).filter_map(|batch| {
        let batch = batch?;
        let data = serde_json::to_string(&*batch).unwrap_or_else(|_| "{}".to_string());
        Some(Ok(SseEvent::default().event("insights.batch").data(data)))
    });

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
}
