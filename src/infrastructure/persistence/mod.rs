//! Persistence infrastructure
//!
//! In-memory repository implementations backing the agent. The surrounding
//! system owns the real store; these keep the agent self-contained and give
//! tests a faithful stand-in with the same ordering and filter semantics.

pub mod memory;

pub use memory::{InMemoryJobRepository, InMemoryReportRepository, InMemoryTagRepository};
