//! Portal-specific middleware.

pub mod web_auth;

pub use web_auth::{AUTH_COOKIE, CurrentUser};
