//! Infrastructure layer for external integrations.
//!
//! This layer implements the store contract defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL and in-memory [`crate::domain::repositories::MappingStore`] implementations

pub mod persistence;
