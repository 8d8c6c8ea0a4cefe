//! Infrastructure Layer - External service clients and persistence
//!
//! Concrete implementations of the domain's repository and external-service
//! traits: the Gemini analysis provider, the ledger anchoring client, and the
//! in-memory store.

pub mod ai;
pub mod ledger;
pub mod persistence;

pub use ai::GeminiAnalysisProvider;
pub use ledger::HttpLedgerClient;
pub use persistence::{InMemoryJobRepository, InMemoryReportRepository, InMemoryTagRepository};
