//! HTTP API: the dashboard's view of products, sales and AI insights.

pub mod app;
