//! Simulation domain module
//!
//! Contains domain entities, value objects, errors, repository traits, and
//! external-service traits for docking-simulation jobs, their categorization
//! tags, and generated analysis reports.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
pub use value_objects::*;
