//! Dashboard insights module

pub mod service;

pub use service::{Insights, InsightAggregator};
