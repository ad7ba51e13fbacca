//! Symbolic names for the pages of the portal.
//!
//! Handlers and forms refer to pages by [`Route`] and resolve the path with
//! [`Route::path`], so the URL layout lives in one place.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The API access request form.
    Request,
    /// Status of the current user's access request.
    Status,
    /// API terms of service.
    TermsOfService,
    Login,
    Logout,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Route::Request => "/api-admin",
            Route::Status => "/api-admin/status",
            Route::TermsOfService => "/api-tos",
            Route::Login => "/login",
            Route::Logout => "/logout",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
