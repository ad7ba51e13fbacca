//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access and are implemented by concrete
//! repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`AccessRequestRepository`] - Access request storage and the status lookup
//! - [`UserRepository`] - Users and session tokens

pub mod access_request_repository;
pub mod user_repository;

pub use access_request_repository::AccessRequestRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use access_request_repository::MockAccessRequestRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
