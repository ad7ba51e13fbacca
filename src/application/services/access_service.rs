//! Access request service.

use crate::domain::entities::{AccessRequest, AccessRequestFields, AccessStatus};
use crate::domain::repositories::AccessRequestRepository;
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;

/// Result of submitting a valid access request form.
#[derive(Debug)]
pub enum Submission {
    /// A new request was stored.
    Created(AccessRequest),
    /// The user already had a request; nothing was stored.
    AlreadyRequested,
}

/// Service owning the access request lifecycle.
///
/// - The status lookup used by both web pages
/// - Creation of new requests, stamped with owner and origin
/// - Review transitions performed by administrators
pub struct AccessRequestService {
    repository: Arc<dyn AccessRequestRepository>,
}

impl AccessRequestService {
    /// Creates a new access request service.
    pub fn new(repository: Arc<dyn AccessRequestRepository>) -> Self {
        Self { repository }
    }

    /// Returns the status of the user's request, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn status_of(&self, user_id: i64) -> Result<Option<AccessStatus>, AppError> {
        self.repository.status_of(user_id).await
    }

    /// Stores a validated request for `user_id`.
    ///
    /// `base_url` must already be reduced to scheme and authority.
    ///
    /// A unique-constraint conflict means another submission for the same
    /// user won the race; it is reported as [`Submission::AlreadyRequested`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn submit(
        &self,
        user_id: i64,
        base_url: String,
        fields: AccessRequestFields,
    ) -> Result<Submission, AppError> {
        let new_request = fields.into_new_request(user_id, base_url);

        match self.repository.create(new_request).await {
            Ok(created) => {
                tracing::info!(
                    request_id = created.id,
                    user_id,
                    base_url = %created.base_url,
                    "API access request created"
                );
                Ok(Submission::Created(created))
            }
            Err(e) if e.is_conflict() => {
                tracing::debug!(user_id, "Duplicate API access request ignored");
                Ok(Submission::AlreadyRequested)
            }
            Err(e) => Err(e),
        }
    }

    /// Retrieves the request owned by a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no request.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_for_user(&self, user_id: i64) -> Result<AccessRequest, AppError> {
        self.repository
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Access request not found", json!({ "user_id": user_id }))
            })
    }

    /// Lists requests, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list(&self, status: Option<AccessStatus>) -> Result<Vec<AccessRequest>, AppError> {
        self.repository.list(status).await
    }

    /// Moves the user's request to `status`.
    ///
    /// Setting the status it already has is a no-op that returns the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user has no request.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn review(&self, user_id: i64, status: AccessStatus) -> Result<AccessRequest, AppError> {
        let request = self.get_for_user(user_id).await?;

        if request.status == status {
            return Ok(request);
        }

        let updated = self.repository.set_status(request.id, status).await?;
        tracing::info!(
            request_id = updated.id,
            user_id,
            from = %request.status,
            to = %updated.status,
            "API access request reviewed"
        );

        Ok(updated)
    }

    /// Checks that the request store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store does not answer.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}
