use serde::{Deserialize, Serialize};

use salesight_core::{DomainError, DomainResult, Entity, ProductId};

/// A product is "low stock" when its on-hand count is strictly below this.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// How many products `top_by_stock` reports by default.
pub const TOP_PRODUCTS_LIMIT: usize = 5;

/// Floor for restock recommendations.
pub const MIN_RECOMMENDED_STOCK: u32 = 20;

/// Product snapshot as supplied by the inventory system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub stock: u32,
}

impl Product {
    pub fn new(id: ProductId, name: impl Into<String>, stock: u32) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name must not be empty"));
        }
        Ok(Self { id, name, stock })
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock < LOW_STOCK_THRESHOLD
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// All products below [`LOW_STOCK_THRESHOLD`], in input order.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// The `limit` products with the highest on-hand stock, highest first.
///
/// Note: this ranks by stock level, not by units sold. Ties keep input order.
pub fn top_by_stock(products: &[Product], limit: usize) -> Vec<&Product> {
    let mut ranked: Vec<&Product> = products.iter().collect();
    ranked.sort_by(|a, b| b.stock.cmp(&a.stock));
    ranked.truncate(limit);
    ranked
}

/// Restock target: three times the current stock, never below [`MIN_RECOMMENDED_STOCK`].
pub fn recommended_stock(stock: u32) -> u32 {
    stock.saturating_mul(3).max(MIN_RECOMMENDED_STOCK)
}
