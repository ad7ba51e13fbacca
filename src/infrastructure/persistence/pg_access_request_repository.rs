//! PostgreSQL implementation of the access request repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AccessRequest, AccessStatus, NewAccessRequest};
use crate::domain::repositories::AccessRequestRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, user_id, company_name, website, company_address, reason, base_url, \
                       status, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct AccessRequestRow {
    id: i64,
    user_id: i64,
    company_name: String,
    website: String,
    company_address: String,
    reason: String,
    base_url: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccessRequestRow> for AccessRequest {
    type Error = AppError;

    fn try_from(row: AccessRequestRow) -> Result<Self, Self::Error> {
        let status = parse_status(&row.status)?;

        Ok(AccessRequest {
            id: row.id,
            user_id: row.user_id,
            company_name: row.company_name,
            website: row.website,
            company_address: row.company_address,
            reason: row.reason,
            base_url: row.base_url,
            status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn parse_status(raw: &str) -> Result<AccessStatus, AppError> {
    raw.parse()
        .map_err(|_| AppError::internal("Corrupt access status", json!({ "status": raw })))
}

/// PostgreSQL repository for access requests.
///
/// One request per user is enforced by `UNIQUE (user_id)`; a duplicate insert
/// surfaces as [`AppError::Conflict`].
pub struct PgAccessRequestRepository {
    pool: Arc<PgPool>,
}

impl PgAccessRequestRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessRequestRepository for PgAccessRequestRepository {
    async fn status_of(&self, user_id: i64) -> Result<Option<AccessStatus>, AppError> {
        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM api_access_requests WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(self.pool.as_ref())
                .await?;

        status.as_deref().map(parse_status).transpose()
    }

    async fn create(&self, new_request: NewAccessRequest) -> Result<AccessRequest, AppError> {
        let row: AccessRequestRow = sqlx::query_as(&format!(
            r#"
            INSERT INTO api_access_requests
                (user_id, company_name, website, company_address, reason, base_url)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_request.user_id)
        .bind(new_request.company_name)
        .bind(new_request.website)
        .bind(new_request.company_address)
        .bind(new_request.reason)
        .bind(new_request.base_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_user(&self, user_id: i64) -> Result<Option<AccessRequest>, AppError> {
        let row: Option<AccessRequestRow> = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM api_access_requests WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(AccessRequest::try_from).transpose()
    }

    async fn list(&self, status: Option<AccessStatus>) -> Result<Vec<AccessRequest>, AppError> {
        let rows: Vec<AccessRequestRow> = sqlx::query_as(&format!(
            r#"
            SELECT {COLUMNS}
            FROM api_access_requests
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(status.map(|s| s.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(AccessRequest::try_from).collect()
    }

    async fn set_status(&self, id: i64, status: AccessStatus) -> Result<AccessRequest, AppError> {
        let row: Option<AccessRequestRow> = sqlx::query_as(&format!(
            r#"
            UPDATE api_access_requests
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.ok_or_else(|| AppError::not_found("Access request not found", json!({ "id": id })))?
            .try_into()
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
