//! Machine-facing HTTP layer.
//!
//! # Modules
//!
//! - [`dto`] - Response serialization types
//! - [`handlers`] - JSON endpoint handlers
//! - [`middleware`] - Rate limiting and request tracing shared by all routes

pub mod dto;
pub mod handlers;
pub mod middleware;
