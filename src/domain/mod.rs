//! Domain Layer - Core business logic and entities
//!
//! Contains the entities, value objects, errors, repository traits, and
//! external-service contracts for docking-simulation analysis.

pub mod simulation;

pub use simulation::*;
