mod common;

use api_access_portal::domain::entities::AccessStatus;
use axum::http::StatusCode;
use sqlx::PgPool;

#[sqlx::test]
async fn test_status_page_without_request_redirects_to_form(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (_, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    let server = common::make_server(state);

    let response = server
        .get("/api-admin/status")
        .add_header("Cookie", common::auth_cookie(&token))
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location").to_str().unwrap(), "/api-admin");
    assert_eq!(common::count_requests(&pool).await, 0);
}

#[sqlx::test]
async fn test_status_page_renders_each_status(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let server = common::make_server(state.clone());

    for (i, status) in AccessStatus::ALL.into_iter().enumerate() {
        let (user, token) =
            common::create_signed_in_user(&pool, &state, &format!("user{i}")).await;
        common::create_test_request(&pool, user.id, status).await;

        let response = server
            .get("/api-admin/status")
            .add_header("Cookie", common::auth_cookie(&token))
            .await;

        response.assert_status_ok();
        let html = response.text();
        assert!(html.contains(&format!("<strong>{status}</strong>")), "{status}");
        assert!(html.contains("API support"));
        assert!(html.contains(common::SUPPORT_EMAIL));
    }
}

#[sqlx::test]
async fn test_status_page_does_not_modify_request(pool: PgPool) {
    let state = common::create_test_state(pool.clone(), false);
    let (user, token) = common::create_signed_in_user(&pool, &state, "alice").await;
    common::create_test_request(&pool, user.id, AccessStatus::Pending).await;
    let server = common::make_server(state.clone());

    server
        .get("/api-admin/status")
        .add_header("Cookie", common::auth_cookie(&token))
        .await
        .assert_status_ok();

    assert_eq!(
        state.access_service.status_of(user.id).await.unwrap(),
        Some(AccessStatus::Pending)
    );
    assert_eq!(common::count_requests(&pool).await, 1);
}

#[sqlx::test]
async fn test_status_page_requires_sign_in(pool: PgPool) {
    let state = common::create_test_state(pool, false);
    let server = common::make_server(state);

    let response = server.get("/api-admin/status").await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "/login?next=%2Fapi-admin%2Fstatus"
    );
}

#[sqlx::test]
async fn test_terms_page_is_public(pool: PgPool) {
    let state = common::create_test_state(pool, false);
    let server = common::make_server(state);

    let response = server.get("/api-tos").await;

    response.assert_status_ok();
    assert!(
        response
            .text()
            .contains("Example Academy API Terms of Service")
    );
}
