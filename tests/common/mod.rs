#![allow(dead_code)]

use api_access_portal::domain::entities::{AccessStatus, NewAccessRequest, NewUser, User};
use api_access_portal::domain::repositories::{AccessRequestRepository, UserRepository};
use api_access_portal::infrastructure::persistence::{PgAccessRequestRepository, PgUserRepository};
use api_access_portal::routes::portal_router;
use api_access_portal::state::{AppState, SiteSettings};
use api_access_portal::utils::request_url::AllowedHosts;
use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;

pub const PLATFORM_NAME: &str = "Example Academy";
pub const SUPPORT_EMAIL: &str = "api@example.com";
/// Hosts used by the handler tests; `localhost` is what the test client sends.
pub const ALLOWED_HOSTS: &str = "localhost,example.com,portal.example.com";

pub fn create_test_state(pool: PgPool, behind_proxy: bool) -> AppState {
    let pool = Arc::new(pool);

    AppState::new(
        Arc::new(PgAccessRequestRepository::new(pool.clone())),
        Arc::new(PgUserRepository::new(pool)),
        "test-signing-secret".to_string(),
        SiteSettings {
            platform_name: PLATFORM_NAME.to_string(),
            support_email: SUPPORT_EMAIL.to_string(),
            behind_proxy,
            allowed_hosts: AllowedHosts::parse(ALLOWED_HOSTS),
        },
    )
}

/// Portal routes with authentication, served in-process.
pub fn make_server(state: AppState) -> TestServer {
    let app = portal_router(state.clone()).with_state(state);
    TestServer::new(app).unwrap()
}

/// Creates a user and returns it with a valid raw session token.
pub async fn create_signed_in_user(
    pool: &PgPool,
    state: &AppState,
    username: &str,
) -> (User, String) {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));
    let user = repo
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
        })
        .await
        .unwrap();

    let (token, _) = state
        .auth_service
        .issue_token(user.id, "test")
        .await
        .unwrap();

    (user, token)
}

pub fn auth_cookie(token: &str) -> String {
    format!("auth_token={token}")
}

pub fn new_request(user_id: i64) -> NewAccessRequest {
    NewAccessRequest {
        user_id,
        company_name: "Acme Learning".to_string(),
        website: "https://acme.test".to_string(),
        company_address: "1 Main Street".to_string(),
        reason: "Sync our course catalog.".to_string(),
        base_url: "https://portal.example.com".to_string(),
    }
}

pub async fn create_test_request(pool: &PgPool, user_id: i64, status: AccessStatus) -> i64 {
    let repo = PgAccessRequestRepository::new(Arc::new(pool.clone()));
    let created = repo.create(new_request(user_id)).await.unwrap();

    if status != created.status {
        repo.set_status(created.id, status).await.unwrap();
    }

    created.id
}

pub async fn count_requests(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM api_access_requests")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn valid_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("company_name", "Acme Learning"),
        ("website", "https://acme.test"),
        ("company_address", "1 Main Street\nSpringfield"),
        ("reason", "Sync our course catalog."),
        ("terms_of_service", "on"),
    ]
}
