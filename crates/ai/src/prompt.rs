//! Prompt templates for the three insight categories (plus ad-hoc recommendations).
//!
//! Only aggregate counts are embedded; product names and sale details never
//! leave the process through these prompts.

use salesight_inventory::{LOW_STOCK_THRESHOLD, Product, TOP_PRODUCTS_LIMIT, low_stock, top_by_stock};

use crate::config::DEFAULT_LANGUAGE;

/// Builds prompt text from dashboard aggregates. Pure: same input, same text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightRequestBuilder {
    language: String,
}

impl Default for InsightRequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

impl InsightRequestBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn build_analytics_prompt(&self, sale_count: usize, product_count: usize) -> String {
        let language = &self.language;
        format!(
            r#"As a business analytics expert, analyze this sales and inventory data:

Total sales: {sale_count}
Products in inventory: {product_count}

Provide:
1. A brief executive summary (at most 100 words)
2. 3-5 specific recommendations to improve sales
3. 2-3 trends you can identify
4. Important alerts if any products are low on stock

Answer in {language}, as a single valid JSON object with exactly this shape:
{{
  "summary": "text",
  "recommendations": ["rec1", "rec2"],
  "trends": ["trend1", "trend2"],
  "alerts": ["alert1", "alert2"]
}}"#
        )
    }

    pub fn build_inventory_prompt(&self, products: &[Product]) -> String {
        let language = &self.language;
        let low_stock_count = low_stock(products).len();
        let top_count = top_by_stock(products, TOP_PRODUCTS_LIMIT).len();
        let product_count = products.len();
        format!(
            r#"As an inventory management expert, analyze these products:

Products with low stock (fewer than {LOW_STOCK_THRESHOLD} units): {low_stock_count}
Products ranked by stock level: {top_count}
Total products: {product_count}

Provide:
1. The list of products at critical stock
2. The top {TOP_PRODUCTS_LIMIT} products by turnover
3. 3-5 specific insights to optimize inventory

Answer in {language}, as a single valid JSON object with exactly this shape:
{{
  "lowStock": [
    {{"productName": "Name", "currentStock": 5, "recommendedStock": 20}}
  ],
  "topProducts": [
    {{"productName": "Name", "salesCount": 50}}
  ],
  "insights": ["insight1", "insight2"]
}}"#
        )
    }

    pub fn build_prediction_prompt(&self, sale_count: usize) -> String {
        let language = &self.language;
        format!(
            r#"Based on historical sales data, give a prediction for next month.
Total transactions: {sale_count}

Keep the prediction brief and concise, in {language} (at most 50 words)."#
        )
    }

    pub fn build_recommendation_prompt(&self, context: &str) -> String {
        let language = &self.language;
        let context = context.trim();
        format!(
            r#"As a business consultant, give specific recommendations based on this context:
{context}

Provide 3 practical, actionable recommendations in {language}."#
        )
    }
}
