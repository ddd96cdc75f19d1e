//! `salesight-core` — shared building blocks for the dashboard crates.
//!
//! Only plain domain primitives live here (no IO, no HTTP, no async).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{ProductId, SaleId};
pub use value_object::ValueObject;
