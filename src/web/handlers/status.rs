//! Access request status page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Extension, extract::State};

use crate::error::AppError;
use crate::state::AppState;
use crate::web::middleware::CurrentUser;
use crate::web::pages::{PageAction, StatusView, status_page};
use crate::web::route_name::Route;

/// Template for the status page.
///
/// Renders `templates/api_admin/status.html`.
#[derive(Template, WebTemplate)]
#[template(path = "api_admin/status.html")]
pub struct StatusTemplate {
    pub view: StatusView,
    pub username: String,
    logout: Route,
}

impl StatusTemplate {
    pub fn new(view: StatusView, username: String) -> Self {
        Self {
            view,
            username,
            logout: Route::Logout,
        }
    }
}

/// Renders the status of the user's access request.
///
/// # Endpoint
///
/// `GET /api-admin/status`
///
/// Users without a request are redirected to the request form.
pub async fn status_handler(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<PageAction<StatusTemplate>, AppError> {
    let status = st.access_service.status_of(user.id).await?;

    Ok(status_page(status, &st.site.support_email)
        .map(|view| StatusTemplate::new(view, user.username)))
}
