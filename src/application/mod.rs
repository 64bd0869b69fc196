//! Application layer services implementing the shortcode lifecycle.
//!
//! Services consume the [`crate::domain::repositories::MappingStore`] trait and
//! provide a clean API for HTTP handlers and the admin CLI. They are stateless
//! and can be shared freely between requests.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Code generation and mapping creation
//! - [`services::redirect_service::RedirectService`] - Expiry-aware resolution with click recording
//! - [`services::stats_service::StatsService`] - Click history reporting

pub mod services;
