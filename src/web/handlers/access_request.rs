//! API access request form handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use crate::application::services::Submission;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_url::RequestUrl;
use crate::web::forms::{AccessRequestForm, AccessRequestInput, validate};
use crate::web::middleware::CurrentUser;
use crate::web::pages::{PageAction, request_page};
use crate::web::route_name::Route;

/// Template for the access request form.
///
/// Renders `templates/api_admin/access_request_form.html`.
#[derive(Template, WebTemplate)]
#[template(path = "api_admin/access_request_form.html")]
pub struct AccessRequestTemplate {
    pub form: AccessRequestForm,
    pub username: String,
    pub platform_name: String,
    action: Route,
    logout: Route,
}

impl AccessRequestTemplate {
    pub fn new(form: AccessRequestForm, username: String, platform_name: String) -> Self {
        Self {
            form,
            username,
            platform_name,
            action: Route::Request,
            logout: Route::Logout,
        }
    }
}

/// Renders the access request form.
///
/// # Endpoint
///
/// `GET /api-admin`
///
/// Users who already have a request are redirected to the status page.
pub async fn request_form_handler(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<PageAction<AccessRequestTemplate>, AppError> {
    let status = st.access_service.status_of(user.id).await?;

    Ok(request_page(status, || {
        AccessRequestTemplate::new(
            AccessRequestForm::new(&st.site.platform_name),
            user.username,
            st.site.platform_name.clone(),
        )
    }))
}

/// Handles a submitted access request form.
///
/// # Endpoint
///
/// `POST /api-admin`
///
/// # Responses
///
/// - **303 See Other** to the status page when the request was stored, or
///   when the user already had one
/// - **200 OK** with the form re-rendered and errors shown when the input
///   is invalid; nothing is stored
/// - **400 Bad Request** when the request host is not in `ALLOWED_HOSTS`
///
/// The stored `base_url` is the scheme and authority of the URL this form
/// was posted to.
pub async fn submit_request_handler(
    State(st): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    request_url: RequestUrl,
    Form(input): Form<AccessRequestInput>,
) -> Result<Response, AppError> {
    if st.access_service.status_of(user.id).await?.is_some() {
        tracing::debug!(user_id = user.id, "Access request already exists, skipping form");
        return Ok(Redirect::to(Route::Status.path()).into_response());
    }

    let fields = match validate(&input) {
        Ok(fields) => fields,
        Err(errors) => {
            tracing::debug!(
                user_id = user.id,
                fields = ?errors.fields().collect::<Vec<_>>(),
                "Access request form rejected"
            );
            let page = AccessRequestTemplate::new(
                AccessRequestForm::bound(&st.site.platform_name, &input, &errors),
                user.username,
                st.site.platform_name.clone(),
            );
            return Ok(page.into_response());
        }
    };

    match st
        .access_service
        .submit(user.id, request_url.base_url(), fields)
        .await?
    {
        Submission::Created(_) | Submission::AlreadyRequested => {
            Ok(Redirect::to(Route::Status.path()).into_response())
        }
    }
}
