//! HTML template rendering handlers for the portal pages.

mod access_request;
mod login;
mod status;
mod terms;

pub use access_request::{AccessRequestTemplate, request_form_handler, submit_request_handler};
pub use login::{LoginTemplate, login_page, login_submit, logout_handler, safe_next};
pub use status::{StatusTemplate, status_handler};
pub use terms::{TermsTemplate, terms_handler};
