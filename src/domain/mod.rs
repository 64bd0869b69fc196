//! Domain layer containing business entities and the store contract.
//!
//! This module defines the data model of the shortcode lifecycle and the
//! [`repositories::MappingStore`] trait the engine consumes. It has no
//! dependencies on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Mappings and click events
//! - [`repositories`] - Store trait (insert-if-absent, atomic append)
//! - [`click_recorder`] - Builds and appends click events on resolution
//!
//! # Click Processing Flow
//!
//! 1. HTTP handler receives a redirect request
//! 2. [`crate::application::services::RedirectService`] checks expiry
//! 3. [`click_recorder::ClickRecorder`] appends the event through the store
//! 4. The append result is returned to the caller, success or failure

pub mod click_recorder;
pub mod entities;
pub mod repositories;
