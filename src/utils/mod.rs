//! Utility functions for code generation, URL processing, and request handling.
//!
//! - [`code_generator`] - Random code generation and custom code validation
//! - [`url_validator`] - Redirect target validation
//! - [`short_link`] - Short link construction from a public prefix
//! - [`client_info`] - Origin and client IP extraction from HTTP headers

pub mod client_info;
pub mod code_generator;
pub mod short_link;
pub mod url_validator;
