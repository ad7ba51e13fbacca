//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic.
//!
//! # Entity Types
//!
//! - [`AccessRequest`] - A user's request for API access and its review status
//! - [`User`] - An account that signs in with a session token
//!
//! # Design Pattern
//!
//! Separate structs are used for creation:
//! - `NewAccessRequest`, `NewUser` - For creating new records
//! - `AccessRequestFields` - Validated form values before they are stamped
//!   with an owner and origin

pub mod access_request;
pub mod user;

pub use access_request::{
    AccessRequest, AccessRequestFields, AccessStatus, NewAccessRequest, UnknownStatus,
};
pub use user::{NewUser, SessionToken, User};
