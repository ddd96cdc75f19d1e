use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use salesight_inventory::Product;
use salesight_sales::Sale;

use crate::config::InsightConfig;
use crate::insights::{
    AnalyticsInsights, FALLBACK_PREDICTION, FALLBACK_RECOMMENDATION, InventoryInsights,
};
use crate::prompt::InsightRequestBuilder;
use crate::result::{AiError, InsightOutcome};
use crate::transport::{GeminiTransport, TextGenerator};

/// Insight calls for the dashboard.
///
/// Each call makes exactly one remote attempt (no retry, no cache) and always
/// returns a value: on any failure the fallback payload is returned, tagged
/// with the reason.
#[derive(Clone)]
pub struct InsightClient {
    generator: Arc<dyn TextGenerator>,
    prompts: InsightRequestBuilder,
}

impl core::fmt::Debug for InsightClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InsightClient")
            .field("prompts", &self.prompts)
            .finish_non_exhaustive()
    }
}

impl InsightClient {
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: InsightRequestBuilder) -> Self {
        Self { generator, prompts }
    }

    /// Client backed by [`GeminiTransport`], answering in `config.language`.
    pub fn from_config(config: InsightConfig) -> Result<Self, AiError> {
        let prompts = InsightRequestBuilder::new(config.language.clone());
        let transport = GeminiTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), prompts))
    }

    pub async fn analytics_insights(
        &self,
        sales: &[Sale],
        products: &[Product],
    ) -> InsightOutcome<AnalyticsInsights> {
        let prompt = self.prompts.build_analytics_prompt(sales.len(), products.len());
        let result = match self.generator.generate(&prompt).await {
            Ok(text) => parse_reply(&text),
            Err(e) => Err(e),
        };
        settle("analytics", result, AnalyticsInsights::fallback)
    }

    pub async fn inventory_insights(&self, products: &[Product]) -> InsightOutcome<InventoryInsights> {
        let prompt = self.prompts.build_inventory_prompt(products);
        let result = match self.generator.generate(&prompt).await {
            Ok(text) => parse_reply(&text),
            Err(e) => Err(e),
        };
        settle("inventory", result, || InventoryInsights::fallback(products))
    }

    /// Free-text prediction; the reply is returned as-is.
    pub async fn sales_prediction(&self, sales: &[Sale]) -> InsightOutcome<String> {
        let prompt = self.prompts.build_prediction_prompt(sales.len());
        let result = self.generator.generate(&prompt).await;
        settle("prediction", result, || FALLBACK_PREDICTION.to_string())
    }

    /// Free-text recommendations for an arbitrary business context.
    pub async fn business_recommendation(&self, context: &str) -> InsightOutcome<String> {
        let prompt = self.prompts.build_recommendation_prompt(context);
        let result = self.generator.generate(&prompt).await;
        settle("recommendation", result, || FALLBACK_RECOMMENDATION.to_string())
    }
}

fn settle<T>(
    insight: &'static str,
    result: Result<T, AiError>,
    fallback: impl FnOnce() -> T,
) -> InsightOutcome<T> {
    match result {
        Ok(value) => {
            debug!(insight, "live insight produced");
            InsightOutcome::live(value)
        }
        Err(e) => {
            let reason = e.reason();
            warn!(insight, %reason, error = %e, "insight degraded to fallback");
            InsightOutcome::degraded(fallback(), reason)
        }
    }
}

/// Parse model text as JSON, tolerating a surrounding Markdown code fence.
fn parse_reply<T: DeserializeOwned>(text: &str) -> Result<T, AiError> {
    serde_json::from_str(strip_code_fence(text)).map_err(|e| AiError::parse(e.to_string()))
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line, or inline before the payload.
    let inner = inner.trim_start_matches([' ', '\t']);
    let body = match inner.split_once('\n') {
        Some((info, body)) if info.trim().chars().all(|c| c.is_ascii_alphanumeric()) => body,
        _ => inner
            .strip_prefix("json")
            .or_else(|| inner.strip_prefix("JSON"))
            .unwrap_or(inner),
    };
    body.trim()
}
