//! Repository trait for API access requests.

use crate::domain::entities::{AccessRequest, AccessStatus, NewAccessRequest};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for access requests.
///
/// The store holds at most one request per user. Implementations must reject
/// a second [`create`](AccessRequestRepository::create) for the same user with
/// [`AppError::Conflict`], which is what keeps concurrent submissions from
/// producing duplicates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgAccessRequestRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_access_request.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessRequestRepository: Send + Sync {
    /// Looks up the status of the user's request.
    ///
    /// Returns `Ok(None)` if the user never submitted one.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn status_of(&self, user_id: i64) -> Result<Option<AccessStatus>, AppError>;

    /// Persists a new request with status [`AccessStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the user already has a request.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_request: NewAccessRequest) -> Result<AccessRequest, AppError>;

    /// Finds the request owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_user(&self, user_id: i64) -> Result<Option<AccessRequest>, AppError>;

    /// Lists requests, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, status: Option<AccessStatus>) -> Result<Vec<AccessRequest>, AppError>;

    /// Moves a request to a new status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the request does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_status(&self, id: i64, status: AccessStatus) -> Result<AccessRequest, AppError>;

    /// Checks that the backing store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
