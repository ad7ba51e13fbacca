//! Terms of service page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::state::AppState;

#[derive(Template, WebTemplate)]
#[template(path = "api_admin/terms_of_service.html")]
pub struct TermsTemplate {
    pub platform_name: String,
    pub support_email: String,
}

/// Renders the API terms of service.
///
/// # Endpoint
///
/// `GET /api-tos`
pub async fn terms_handler(State(st): State<AppState>) -> impl IntoResponse {
    TermsTemplate {
        platform_name: st.site.platform_name.clone(),
        support_email: st.site.support_email.clone(),
    }
}
