//! Mapping store implementations.
//!
//! # Stores
//!
//! - [`PgMappingStore`] - PostgreSQL; atomicity from the unique constraint on
//!   `code` and single-statement inserts
//! - [`InMemoryMappingStore`] - Sharded concurrent map; atomicity from per-entry locks

pub mod memory_mapping_store;
pub mod pg_mapping_store;

pub use memory_mapping_store::InMemoryMappingStore;
pub use pg_mapping_store::PgMappingStore;
