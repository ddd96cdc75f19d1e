//! Insight payloads and their fallbacks.

use serde::{Deserialize, Serialize};

use salesight_core::ValueObject;
use salesight_inventory::{Product, TOP_PRODUCTS_LIMIT, low_stock, recommended_stock, top_by_stock};

pub const FALLBACK_PREDICTION: &str =
    "Based on historical trends, sales are expected to grow moderately next month.";

pub const FALLBACK_RECOMMENDATION: &str = "1. Optimize your inventory\n2. Improve the customer experience\n3. Review sales trends regularly";

/// General business analytics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsInsights {
    pub summary: String,
    pub recommendations: Vec<String>,
    pub trends: Vec<String>,
    pub alerts: Vec<String>,
}

impl ValueObject for AnalyticsInsights {}

impl AnalyticsInsights {
    pub fn fallback() -> Self {
        Self {
            summary: "Analyzing sales and inventory data...".to_string(),
            recommendations: vec![
                "Review the products with the highest turnover".to_string(),
                "Adjust prices according to demand".to_string(),
                "Optimize inventory levels".to_string(),
            ],
            trends: vec![
                "Steady growth in sales".to_string(),
                "Higher demand for electronics".to_string(),
            ],
            alerts: vec!["Set up low-stock alerts for critical products".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockInsight {
    pub product_name: String,
    pub current_stock: u32,
    pub recommended_stock: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopProductInsight {
    pub product_name: String,
    pub sales_count: u32,
}

/// Inventory-focused insights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryInsights {
    pub low_stock: Vec<LowStockInsight>,
    pub top_products: Vec<TopProductInsight>,
    pub insights: Vec<String>,
}

impl ValueObject for InventoryInsights {}

impl InventoryInsights {
    /// Local recomputation from the real product list.
    ///
    /// Low-stock entries and the top-by-stock ranking are exact. We have no
    /// per-product sales figures here, so `sales_count` is a synthetic,
    /// rank-based value in `[50, 150)`.
    pub fn fallback(products: &[Product]) -> Self {
        let low_stock = low_stock(products)
            .into_iter()
            .map(|p| LowStockInsight {
                product_name: p.name.clone(),
                current_stock: p.stock,
                recommended_stock: recommended_stock(p.stock),
            })
            .collect();

        let top_products = top_by_stock(products, TOP_PRODUCTS_LIMIT)
            .into_iter()
            .enumerate()
            .map(|(rank, p)| TopProductInsight {
                product_name: p.name.clone(),
                sales_count: synthetic_sales_count(rank),
            })
            .collect();

        Self {
            low_stock,
            top_products,
            insights: vec![
                "Consider restocking products that are running low".to_string(),
                "Review product turnover monthly".to_string(),
                "Set up automatic reorder levels".to_string(),
            ],
        }
    }
}

fn synthetic_sales_count(rank: usize) -> u32 {
    let step = u32::try_from(rank).unwrap_or(u32::MAX).saturating_mul(20);
    149u32.saturating_sub(step).max(50)
}
