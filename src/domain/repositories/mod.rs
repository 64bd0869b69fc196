//! Store trait definitions for the domain layer.
//!
//! The engine talks to persistence only through [`MappingStore`]. Its two
//! write primitives, insert-if-absent and append, are the sole serialization
//! points of the system; services hold no locks of their own.
//!
//! # Implementations
//!
//! - `crate::infrastructure::persistence::PgMappingStore` - PostgreSQL
//! - `crate::infrastructure::persistence::InMemoryMappingStore` - sharded in-memory map
//! - Mock implementation is auto-generated via `mockall` for testing
//!
//! # Testing
//!
//! See integration tests in `tests/repository_mapping.rs` and `tests/engine_*.rs`.

pub mod mapping_store;

pub use mapping_store::MappingStore;

#[cfg(test)]
pub use mapping_store::MockMappingStore;
