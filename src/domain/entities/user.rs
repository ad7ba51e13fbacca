//! Users and their session tokens.

use chrono::{DateTime, Utc};

/// An account that can sign in and request API access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
}

/// Session token metadata.
///
/// Only the HMAC hash of the token is ever stored.
#[derive(Debug, Clone)]
pub struct SessionToken {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl SessionToken {
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }
}
