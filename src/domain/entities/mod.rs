//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`ShortMapping`] - A short code and its redirect target
//! - [`ClickEvent`] - One successful resolution of a mapping
//! - [`MappingHistory`] - A mapping together with its full click history
//!
//! Entities follow the "New Type" pattern with separate structs for creation
//! (`NewMapping`, `NewClick`); ids are assigned by the store.

pub mod click;
pub mod mapping;

pub use click::{ClickEvent, NewClick};
pub use mapping::{DEFAULT_VALIDITY_MINUTES, MappingHistory, NewMapping, ShortMapping};
