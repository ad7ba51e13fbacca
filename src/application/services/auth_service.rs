//! Authentication service for session tokens.

use std::sync::Arc;

use crate::domain::entities::{SessionToken, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::token::{generate_token, hash_token};
use serde_json::json;

/// Service for resolving session tokens to users.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison.
pub struct AuthService {
    repository: Arc<dyn UserRepository>,
    signing_secret: String,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<dyn UserRepository>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    fn hash(&self, token: &str) -> String {
        hash_token(&self.signing_secret, token)
    }

    /// Resolves a raw token to the user that owns it.
    ///
    /// On success, updates the token's `last_used_at` timestamp. A failure to
    /// record usage does not fail authentication.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is empty, unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        if token.is_empty() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Empty token"}),
            ));
        }

        let token_hash = self.hash(token);

        let user = self
            .repository
            .find_by_token_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or revoked token"}))
            })?;

        if let Err(e) = self.repository.touch_token(&token_hash).await {
            tracing::warn!(user_id = user.id, error = %e, "Failed to record token usage");
        }

        Ok(user)
    }

    /// Issues a fresh token for a user.
    ///
    /// Returns the raw token together with the stored metadata. The raw value
    /// cannot be recovered later.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn issue_token(
        &self,
        user_id: i64,
        name: &str,
    ) -> Result<(String, SessionToken), AppError> {
        let raw = generate_token();
        let stored = self
            .repository
            .create_token(user_id, name, &self.hash(&raw))
            .await?;

        Ok((raw, stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn test_user() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut mock_repo = MockUserRepository::new();

        let token = "valid-token";
        let expected_hash = hash_token(&test_secret(), token);
        let touched_hash = expected_hash.clone();

        mock_repo
            .expect_find_by_token_hash()
            .withf(move |hash| hash == &expected_hash)
            .times(1)
            .returning(|_| Ok(Some(test_user())));

        mock_repo
            .expect_touch_token()
            .withf(move |hash| hash == &touched_hash)
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let user = service.authenticate(token).await.unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_empty_token_skips_lookup() {
        let mut mock_repo = MockUserRepository::new();
        mock_repo.expect_find_by_token_hash().times(0);

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_survives_touch_failure() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_find_by_token_hash()
            .times(1)
            .returning(|_| Ok(Some(test_user())));
        mock_repo
            .expect_touch_token()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate("valid-token").await.is_ok());
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_only() {
        let mut mock_repo = MockUserRepository::new();

        mock_repo
            .expect_create_token()
            .times(1)
            .returning(|user_id, name, token_hash| {
                Ok(SessionToken {
                    id: 1,
                    user_id,
                    name: name.to_string(),
                    token_hash: token_hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let (raw, stored) = service.issue_token(1, "laptop").await.unwrap();

        assert_ne!(raw, stored.token_hash);
        assert_eq!(stored.token_hash, hash_token(&test_secret(), &raw));
        assert_eq!(stored.name, "laptop");
    }
}
