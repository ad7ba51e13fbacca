//! Domain entity representing a user's request for API access.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;

/// Review outcome of an access request.
///
/// Web handlers only care whether a status exists; the concrete value is
/// displayed as-is and changed by administrators through the `admin` CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    Pending,
    Denied,
    Approved,
}

impl AccessStatus {
    pub const ALL: [AccessStatus; 3] = [
        AccessStatus::Pending,
        AccessStatus::Denied,
        AccessStatus::Approved,
    ];

    /// Lowercase identifier used in the database and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessStatus::Pending => "pending",
            AccessStatus::Denied => "denied",
            AccessStatus::Approved => "approved",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown access status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for AccessStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AccessStatus::Pending),
            "denied" => Ok(AccessStatus::Denied),
            "approved" => Ok(AccessStatus::Approved),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// A persisted API access request.
///
/// Each user owns at most one request.
#[derive(Debug, Clone)]
pub struct AccessRequest {
    pub id: i64,
    pub user_id: i64,
    pub company_name: String,
    pub website: String,
    pub company_address: String,
    pub reason: String,
    /// Scheme and host of the page the request was submitted from.
    pub base_url: String,
    pub status: AccessStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cleaned values of a valid access request form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessRequestFields {
    pub company_name: String,
    pub website: String,
    pub company_address: String,
    pub reason: String,
}

impl AccessRequestFields {
    /// Stamps the form values with their owner and origin.
    pub fn into_new_request(self, user_id: i64, base_url: String) -> NewAccessRequest {
        NewAccessRequest {
            user_id,
            company_name: self.company_name,
            website: self.website,
            company_address: self.company_address,
            reason: self.reason,
            base_url,
        }
    }
}

/// Input data for creating a new access request.
///
/// New requests always start as [`AccessStatus::Pending`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccessRequest {
    pub user_id: i64,
    pub company_name: String,
    pub website: String,
    pub company_address: String,
    pub reason: String,
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in AccessStatus::ALL {
            assert_eq!(status.as_str().parse::<AccessStatus>().unwrap(), status);
        }
    }

    #[test]
    fn test_unknown_status_rejected() {
        let err = "revoked".parse::<AccessStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown access status: revoked");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(AccessStatus::Approved.to_string(), "approved");
    }

    #[test]
    fn test_fields_into_new_request() {
        let fields = AccessRequestFields {
            company_name: "Acme".to_string(),
            website: "https://acme.test".to_string(),
            company_address: "1 Road".to_string(),
            reason: "Course catalog sync".to_string(),
        };

        let new_request = fields.into_new_request(7, "https://portal.test".to_string());

        assert_eq!(new_request.user_id, 7);
        assert_eq!(new_request.company_name, "Acme");
        assert_eq!(new_request.base_url, "https://portal.test");
    }
}
