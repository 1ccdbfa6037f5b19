//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`store`] - Key-value store protocol (Redis and in-process implementations)
//! - [`persistence`] - Repository implementations on top of the store

pub mod persistence;
pub mod store;
