//! Domain layer containing business entities and rules.
//!
//! - [`entities`] - Core data structures
//! - [`validation`] - Pure shape checks for paths and destinations
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! layers.

pub mod entities;
pub mod repositories;
pub mod validation;
