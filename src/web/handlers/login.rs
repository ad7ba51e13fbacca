//! Login and logout handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::AUTH_COOKIE;
use crate::web::route_name::Route;

/// Template for the login page.
///
/// Renders `templates/login.html` with:
/// - Token input form
/// - The page to return to after signing in
/// - An error message after a rejected attempt
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub next: String,
    action: Route,
}

impl LoginTemplate {
    pub fn new(error: Option<String>, next: String) -> Self {
        Self {
            error,
            next,
            action: Route::Login,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub next: String,
}

/// Returns `next` if it is a local path, otherwise the request page.
///
/// Rejects absolute URLs and protocol-relative (`//host`) or backslash
/// forms that browsers resolve to another origin.
pub fn safe_next(next: Option<&str>) -> String {
    match next {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => Route::Request.path().to_string(),
    }
}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /login?next=<path>`
pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate::new(None, safe_next(query.next.as_deref()))
}

/// Signs the user in with a session token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Responses
///
/// - **303 See Other** to `next` with the `auth_token` cookie set
/// - **200 OK** with the login page and an error for a rejected token
pub async fn login_submit(
    State(st): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let next = safe_next(Some(form.next.as_str()));
    let token = form.token.trim();

    match st.auth_service.authenticate(token).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, "User signed in");
            let cookie = format!("{AUTH_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            Ok(([(SET_COOKIE, cookie)], Redirect::to(&next)).into_response())
        }
        Err(AppError::Unauthorized { .. }) => {
            tracing::debug!("Rejected sign-in attempt");
            Ok(LoginTemplate::new(Some("Invalid or revoked token.".to_string()), next)
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// Clears the session cookie.
///
/// # Endpoint
///
/// `POST /logout`
pub async fn logout_handler() -> impl IntoResponse {
    let cookie = format!("{AUTH_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    ([(SET_COOKIE, cookie)], Redirect::to(Route::Login.path()))
}
