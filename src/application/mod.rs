//! Application Layer - Use cases and services
//!
//! Orchestrates the domain model: the pipeline executor that carries one job
//! through analysis, and the read-only insight aggregator for the dashboard.

pub mod insights;
pub mod pipeline;

pub use insights::*;
pub use pipeline::*;
