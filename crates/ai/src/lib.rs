//! `salesight-ai`
//!
//! **Responsibility:** narrative insights for the dashboard, produced by a
//! remote text-generation model.
//!
//! - Prompts are built from aggregate counts only (pure, no IO).
//! - Every public insight call is total: remote failures degrade to a
//!   fallback payload tagged with the reason, never to an error.
//! - Results are insights, not domain data; nothing here mutates inventory or sales.

pub mod client;
pub mod config;
pub mod insights;
pub mod prompt;
pub mod result;
pub mod transport;

pub use client::InsightClient;
pub use config::{ConfigError, GenerationConfig, InsightConfig};
pub use insights::{AnalyticsInsights, InventoryInsights, LowStockInsight, TopProductInsight};
pub use prompt::InsightRequestBuilder;
pub use result::{AiError, DegradedReason, InsightOutcome};
pub use transport::{GeminiTransport, TextGenerator};
