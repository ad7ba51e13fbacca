//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::access_service::AccessRequestService`] - Status lookup, submission and review
//! - [`services::auth_service::AuthService`] - Session token authentication

pub mod services;
