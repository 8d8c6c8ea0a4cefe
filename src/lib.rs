//! Moldock - Autonomous analysis agent for molecular-docking simulation jobs
//!
//! The agent discovers simulation jobs awaiting analysis and carries each one
//! through a fixed pipeline: categorization, AI report generation, optional
//! ledger anchoring, and persistence.
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Core domain models, entities, and collaborator traits
//! - [`application`] — The pipeline executor and the insight aggregator
//! - [`infrastructure`] — Gemini provider, ledger client, in-memory store
//! - [`workers`] — The fixed-interval scheduler
//! - [`logging`] — Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! moldock/
//! ├── domain/           # Entities, statuses, errors, store + service traits
//! ├── application/      # PipelineExecutor, InsightAggregator
//! ├── infrastructure/   # Gemini client, ledger RPC client, repositories
//! ├── workers/          # Scheduler (interval loop, shutdown token)
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! Load configuration from files and environment:
//!
//! ```rust,ignore
//! use moldock::Config;
//!
//! let config = Config::load()?;
//! ```
//!
//! Environment variables use the `MOLDOCK__` prefix with double underscore
//! separators:
//!
//! ```bash
//! MOLDOCK__AGENT__POLL_INTERVAL_SECONDS=5
//! MOLDOCK__LOGGING__FORMAT=json
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod workers;

pub use application::insights::{InsightAggregator, Insights};
pub use application::pipeline::{PipelineExecutor, RunResult};
pub use config::Config;
pub use logging::init_tracing;
pub use workers::Scheduler;
