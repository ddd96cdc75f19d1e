//! AI orchestration adapters.
//!
//! These components fan out insight batches and decide which result the
//! display shows. Individual insight calls never fail, so a batch always
//! completes once its slowest call returns.

pub mod batch;
pub mod board;
pub mod refresher;

pub use batch::{InsightBatch, run_batch};
pub use board::{AcceptPolicy, BatchTicket, InsightBoard, Settled};
pub use refresher::InsightRefresher;
