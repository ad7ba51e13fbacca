//! Business logic services for the application layer.

pub mod access_service;
pub mod auth_service;

pub use access_service::{AccessRequestService, Submission};
pub use auth_service::AuthService;
