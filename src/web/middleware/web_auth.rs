//! Cookie-based authentication middleware for portal pages.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::route_name::Route;

/// Name of the cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

/// The signed-in user, inserted into request extensions by [`layer`].
///
/// Handlers behind the middleware extract it with
/// `Extension(CurrentUser(user)): Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Extracts the session token from the `Cookie` header.
///
/// Handles multiple cookies in one header by splitting on semicolons and
/// ignoring every cookie but [`AUTH_COOKIE`].
pub fn auth_token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .flat_map(|cookie_str| cookie_str.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(AUTH_COOKIE), Some(value)) if !value.is_empty() => Some(value.to_string()),
                _ => None,
            }
        })
}

/// Redirect to the login page that brings the user back to `path_and_query`.
fn login_redirect(path_and_query: &str) -> Redirect {
    let next: String = url::form_urlencoded::byte_serialize(path_and_query.as_bytes()).collect();
    Redirect::to(&format!("{}?next={}", Route::Login.path(), next))
}

/// Authenticates page requests using the `auth_token` cookie.
///
/// # Cookie Format
///
/// ```text
/// Cookie: auth_token=<token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract `auth_token` cookie from request
/// 2. Resolve the token via [`crate::application::services::AuthService`]
/// 3. On success, insert [`CurrentUser`] and continue to handler
/// 4. On missing or rejected token, redirect to the login page with `next`
///    set to the requested path
///
/// Store failures are not treated as a bad token; they surface as an error
/// response instead of bouncing the user to the login page.
pub async fn layer(State(st): State<AppState>, mut req: Request, next: Next) -> Response {
    let path_and_query = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| "/".to_string());

    let Some(token) = auth_token_from_headers(req.headers()) else {
        return login_redirect(&path_and_query).into_response();
    };

    match st.auth_service.authenticate(&token).await {
        Ok(user) => {
            tracing::Span::current().record("user_id", user.id);
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(AppError::Unauthorized { .. }) => login_redirect(&path_and_query).into_response(),
        Err(e) => e.into_response(),
    }
}
