//! Completed sales as reported by the point-of-sale collaborator.
//!
//! The insight flow reads only how many sales exist; the remaining fields are
//! carried so the dataset round-trips through the API unchanged.

pub mod sale;

pub use sale::Sale;
