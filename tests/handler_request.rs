mod common;

use api_access_portal::domain::entities::AccessStatus;
use api_access_portal::domain::repositories::AccessRequestRepository;
use api_access_portal::infrastructure::persistence::PgAccessRequestRepository;
use axum::http::StatusCode;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_request_page_without_request_shows_form(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .get("/api-admin")
        .add_header("Cookie", common::auth_cookie(&token))
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains(r#"name="company_name""#));
    assert!(html.contains(r#"name="website""#));
    assert!(html.contains(r#"name="company_address""#));
    assert!(html.contains(r#"name="reason""#));
    assert!(html.contains(r#"name="terms_of_service""#));
    assert!(html.contains("The name of your company."));
}

#[sqlx::test]
async fn test_request_page_redirects_for_every_status(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let server = common::make_server(state.clone());

    for (i, status) in AccessStatus::ALL.into_iter().enumerate() {
        let (user, token) =
            common::create_signed_in_user(&pool, &state, &format!("user{i}")).await;
        common::create_test_request(&pool, user.id, status).await;

        let response = server
            .get("/api-admin")
            .add_header("Cookie", common::auth_cookie(&token))
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            "/api-admin/status"
        );
    }
}

#[sqlx::test]
async fn test_request_page_requires_sign_in(pool: PgPool) {
    let state = common::create_test_state(pool, false);
    let server = common::make_server(state);

    let response = server.get("/api-admin").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/login?next=%2Fapi-admin"
    );
}

#[sqlx::test]
async fn test_request_page_rejects_unknown_token(pool: PgPool) {
    let state = common::create_test_state(pool, false);
    let server = common::make_server(state);

    let response = server
        .get("/api-admin")
        .add_header("Cookie", common::auth_cookie("not-a-real-token"))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert!(
        response
            .header("location")
            .to_str()
            .unwrap()
            .starts_with("/login")
    );
}

#[sqlx::test]
async fn test_terms_label_links_to_terms_page_unescaped(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .get("/api-admin")
        .add_header("Cookie", common::auth_cookie(&token))
        .await;

    let html = response.text();
    assert!(html.contains(r#"<a href="/api-tos">Example Academy API Terms of Service</a>"#));
    assert!(!html.contains("&#60;a href"));
}

#[sqlx::test]
async fn test_submit_without_terms_rerenders_with_error(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let form: Vec<_> = common::valid_form()
        .into_iter()
        .filter(|(name, _)| *name != "terms_of_service")
        .collect();

    let response = server
        .post("/api-admin")
        .add_header("Host", "example.com")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&form)
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("This field is required."));
    // Submitted values are kept.
    assert!(html.contains(r#"value="Acme Learning""#));
    assert_eq!(common::count_requests(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_invalid_website_rerenders(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let form: Vec<_> = common::valid_form()
        .into_iter()
        .map(|(name, value)| {
            if name == "website" {
                (name, "not a url")
            } else {
                (name, value)
            }
        })
        .collect();

    let response = server
        .post("/api-admin")
        .add_header("Host", "example.com")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&form)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Enter a valid URL."));
    assert_eq!(common::count_requests(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_valid_form_stores_request_behind_proxy(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), true);
    let (user, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-admin?ref=1")
        .add_header("X-Forwarded-Proto", "https")
        .add_header("X-Forwarded-Host", "example.com")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&common::valid_form())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/api-admin/status"
    );

    let repo = PgAccessRequestRepository::new(Arc::new(pool.clone()));
    let stored = repo.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.base_url, "https://example.com");
    assert_eq!(stored.user_id, user.id);
    assert_eq!(stored.company_name, "Acme Learning");
    assert_eq!(stored.status, AccessStatus::Pending);
}

#[sqlx::test]
async fn test_submit_uses_host_header_without_proxy(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (user, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-admin")
        .add_header("Host", "portal.example.com:8080")
        .add_header("X-Forwarded-Proto", "https")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&common::valid_form())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let repo = PgAccessRequestRepository::new(Arc::new(pool.clone()));
    let stored = repo.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.base_url, "http://portal.example.com:8080");
}

#[sqlx::test]
async fn test_submit_with_existing_request_redirects_without_storing(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (user, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    common::create_test_request(&pool, user.id, AccessStatus::Denied).await;
    let server = common::make_server(state);

    let response = server
        .post("/api-admin")
        .add_header("Host", "example.com")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&common::valid_form())
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/api-admin/status"
    );
    assert_eq!(common::count_requests(&pool).await, 1);
}

#[sqlx::test]
async fn test_submit_with_unknown_host_is_rejected(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-admin")
        .add_header("Host", "attacker.invalid")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&common::valid_form())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(common::count_requests(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_with_unknown_forwarded_host_is_rejected(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), true);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .post("/api-admin")
        .add_header("Host", "example.com")
        .add_header("X-Forwarded-Host", "attacker.invalid")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&common::valid_form())
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(common::count_requests(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_stores_trimmed_values(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (user, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let form: Vec<_> = common::valid_form()
        .into_iter()
        .map(|(name, value)| {
            if name == "company_name" {
                (name, "  Acme Learning  ")
            } else {
                (name, value)
            }
        })
        .collect();

    let response = server
        .post("/api-admin")
        .add_header("Host", "example.com")
        .add_header("Cookie", common::auth_cookie(&token))
        .form(&form)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);

    let repo = PgAccessRequestRepository::new(Arc::new(pool.clone()));
    let stored = repo.find_by_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.company_name, "Acme Learning");
}
