//! Inventory read side consumed by the insight flow.
//!
//! The inventory system owns products; this crate only models the snapshot
//! handed to us and the stock selection rules applied to it.

pub mod product;

pub use product::{
    LOW_STOCK_THRESHOLD, MIN_RECOMMENDED_STOCK, Product, TOP_PRODUCTS_LIMIT, low_stock,
    recommended_stock, top_by_stock,
};
