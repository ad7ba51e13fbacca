//! Portal route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    login_page, login_submit, logout_handler, request_form_handler, status_handler,
    submit_request_handler, terms_handler,
};
use crate::web::route_name::Route;
use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

/// Portal routes requiring a signed-in user.
///
/// Protected via [`crate::web::middleware::web_auth`] (cookie-based).
///
/// # Endpoints
///
/// - `GET /api-admin` - Access request form
/// - `POST /api-admin` - Submit an access request
/// - `GET /api-admin/status` - Status of the user's request
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            Route::Request.path(),
            get(request_form_handler).post(submit_request_handler),
        )
        .route(Route::Status.path(), get(status_handler))
}

/// Public portal routes without authentication.
///
/// # Endpoints
///
/// - `GET /` - Redirects to the request page
/// - `GET /api-tos` - Terms of service
/// - `GET /login` - Token sign-in page
/// - `POST /logout` - Sign out
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(Route::Request.path()) }))
        .route(Route::TermsOfService.path(), get(terms_handler))
        .route(Route::Login.path(), get(login_page))
        .route(Route::Logout.path(), post(logout_handler))
}

/// Token submission, kept apart so it can be rate limited more strictly.
///
/// # Endpoints
///
/// - `POST /login` - Validate a token and set the session cookie
pub fn sign_in_routes() -> Router<AppState> {
    Router::new().route(Route::Login.path(), post(login_submit))
}
