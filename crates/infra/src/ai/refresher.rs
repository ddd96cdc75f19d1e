use std::sync::{Arc, Mutex};

use tokio::task::JoinHandle;
use tracing::debug;

use salesight_ai::InsightClient;
use salesight_inventory::Product;
use salesight_sales::Sale;

use crate::ai::batch::run_batch;
use crate::ai::board::{BatchTicket, InsightBoard, Settled};

type Inputs = (Arc<[Product]>, Arc<[Sale]>);

/// Re-runs insight batches on demand or when the input collections change.
///
/// Refreshes are never serialized or cancelled; overlapping batches are
/// resolved by the board's accept policy.
#[derive(Debug)]
pub struct InsightRefresher {
    client: InsightClient,
    board: Arc<InsightBoard>,
    last_inputs: Mutex<Option<Inputs>>,
}

impl InsightRefresher {
    pub fn new(client: InsightClient, board: Arc<InsightBoard>) -> Self {
        Self {
            client,
            board,
            last_inputs: Mutex::new(None),
        }
    }

    pub fn board(&self) -> &Arc<InsightBoard> {
        &self.board
    }

    pub fn client(&self) -> &InsightClient {
        &self.client
    }

    /// Run one batch unconditionally and settle it on the board.
    pub async fn refresh(&self, products: &[Product], sales: &[Sale]) -> Settled {
        let ticket = self.board.begin();
        self.run(ticket, products, sales).await
    }

    /// Run a batch only if `products` or `sales` is a different collection
    /// (by identity) from the last one seen. Returns `None` when skipped.
    pub async fn refresh_if_changed(
        &self,
        products: Arc<[Product]>,
        sales: Arc<[Sale]>,
    ) -> Option<Settled> {
        if !self.observe(&products, &sales) {
            debug!("insight inputs unchanged; skipping batch");
            return None;
        }
        Some(self.refresh(&products, &sales).await)
    }

    /// Start a batch on the runtime and return its ticket immediately.
    pub fn spawn_refresh(
        self: &Arc<Self>,
        products: Arc<[Product]>,
        sales: Arc<[Sale]>,
    ) -> (BatchTicket, JoinHandle<Settled>) {
        let ticket = self.board.begin();
        let this = Arc::clone(self);
        let handle = tokio::spawn(async move { this.run(ticket, &products, &sales).await });
        (ticket, handle)
    }

    /// Record the inputs; true when they differ from the previous ones.
    pub fn observe(&self, products: &Arc<[Product]>, sales: &Arc<[Sale]>) -> bool {
        let mut last = self
            .last_inputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let changed = match last.as_ref() {
            Some((p, s)) => !Arc::ptr_eq(p, products) || !Arc::ptr_eq(s, sales),
            None => true,
        };
        if changed {
            *last = Some((Arc::clone(products), Arc::clone(sales)));
        }
        changed
    }

    async fn run(&self, ticket: BatchTicket, products: &[Product], sales: &[Sale]) -> Settled {
        let batch = run_batch(&self.client, ticket, products, sales).await;
        self.board.settle(batch)
    }
}
