//! Gate decisions for the request and status pages.
//!
//! Both pages depend on one fact: whether the user already has an access
//! request. The decisions are plain functions of that status so they can be
//! tested without a server; the handlers only fetch the status and turn the
//! resulting [`PageAction`] into a response.

use axum::response::{IntoResponse, Redirect, Response};

use crate::domain::entities::AccessStatus;
use crate::web::route_name::Route;

/// Static label shown next to the support address on the status page.
pub const SUPPORT_CONTACT_LABEL: &str = "API support";

/// Outcome of a page gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction<T> {
    Render(T),
    Redirect(Route),
}

impl<T> PageAction<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PageAction<U> {
        match self {
            PageAction::Render(page) => PageAction::Render(f(page)),
            PageAction::Redirect(route) => PageAction::Redirect(route),
        }
    }
}

impl<T: IntoResponse> IntoResponse for PageAction<T> {
    fn into_response(self) -> Response {
        match self {
            PageAction::Render(page) => page.into_response(),
            PageAction::Redirect(route) => Redirect::to(route.path()).into_response(),
        }
    }
}

/// Decides what the request page shows.
///
/// A user who already has a request, whatever its status, is sent to the
/// status page instead of seeing the form again.
pub fn request_page<T>(status: Option<AccessStatus>, render: impl FnOnce() -> T) -> PageAction<T> {
    match status {
        Some(_) => PageAction::Redirect(Route::Status),
        None => PageAction::Render(render()),
    }
}

/// Display data of the status page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusView {
    pub status: AccessStatus,
    pub support_label: &'static str,
    pub support_email: String,
}

/// Decides what the status page shows.
///
/// Without a request there is nothing to report, so the user is sent to the
/// request form.
pub fn status_page(status: Option<AccessStatus>, support_email: &str) -> PageAction<StatusView> {
    match status {
        Some(status) => PageAction::Render(StatusView {
            status,
            support_label: SUPPORT_CONTACT_LABEL,
            support_email: support_email.to_string(),
        }),
        None => PageAction::Redirect(Route::Request),
    }
}
