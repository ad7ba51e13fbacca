//! Utility functions shared across layers.
//!
//! - [`request_url`] - Absolute request URL and base URL extraction
//! - [`token`] - Session token generation and hashing

pub mod request_url;
pub mod token;
