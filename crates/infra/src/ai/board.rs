use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::{debug, info};

use crate::ai::batch::InsightBatch;

/// Which settled batch the board displays when batches overlap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum AcceptPolicy {
    /// Only a batch issued at or after the displayed one replaces it.
    #[default]
    LatestIssued,
    /// Whatever settles last is displayed, even if it was issued earlier.
    LastSettled,
}

/// Generation handed out when a batch starts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BatchTicket {
    generation: u64,
}

impl BatchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Settled {
    Displayed,
    /// A newer batch was already displayed; this one was dropped.
    Superseded,
}

#[derive(Debug, Default)]
struct BoardState {
    current: Option<Arc<InsightBatch>>,
    in_flight: BTreeSet<u64>,
}

/// Display state for insight batches.
///
/// Batches may overlap (there is no cancellation); the [`AcceptPolicy`]
/// decides which one ends up displayed.
#[derive(Debug)]
pub struct InsightBoard {
    policy: AcceptPolicy,
    issued: AtomicU64,
    state: Mutex<BoardState>,
    tx: watch::Sender<Option<Arc<InsightBatch>>>,
}

impl Default for InsightBoard {
    fn default() -> Self {
        Self::new(AcceptPolicy::default())
    }
}

impl InsightBoard {
    pub fn new(policy: AcceptPolicy) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            policy,
            issued: AtomicU64::new(0),
            state: Mutex::new(BoardState::default()),
            tx,
        }
    }

    /// Start a batch. Generations start at 1 and strictly increase.
    pub fn begin(&self) -> BatchTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.lock().in_flight.insert(generation);
        debug!(generation, "insight batch started");
        BatchTicket { generation }
    }

    pub fn settle(&self, batch: InsightBatch) -> Settled {
        let generation = batch.generation;
        let mut state = self.lock();
        state.in_flight.remove(&generation);

        let accept = match self.policy {
            AcceptPolicy::LastSettled => true,
            AcceptPolicy::LatestIssued => state
                .current
                .as_ref()
                .is_none_or(|shown| generation >= shown.generation),
        };

        if !accept {
            info!(generation, "insight batch superseded by a newer one");
            return Settled::Superseded;
        }

        let batch = Arc::new(batch);
        state.current = Some(batch.clone());
        self.tx.send_replace(Some(batch));
        info!(generation, "insight batch displayed");
        Settled::Displayed
    }

    pub fn current(&self) -> Option<Arc<InsightBatch>> {
        self.lock().current.clone()
    }

    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight() > 0
    }

    /// Receive every batch the board displays.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<InsightBatch>>> {
        self.tx.subscribe()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
