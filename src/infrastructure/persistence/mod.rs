//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgAccessRequestRepository`] - Access requests and status lookup
//! - [`PgUserRepository`] - Users and session tokens

pub mod pg_access_request_repository;
pub mod pg_user_repository;

pub use pg_access_request_repository::PgAccessRequestRepository;
pub use pg_user_repository::PgUserRepository;
