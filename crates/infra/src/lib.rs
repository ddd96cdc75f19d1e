//! Infrastructure layer: orchestration around the insight client.

pub mod ai;
