//! Analysis pipeline module

pub mod executor;

pub use executor::{PipelineExecutor, RunResult};
