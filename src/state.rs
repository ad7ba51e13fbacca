//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{AccessRequestService, AuthService};
use crate::domain::repositories::{AccessRequestRepository, UserRepository};
use crate::utils::request_url::AllowedHosts;

/// Installation-wide display settings, passed explicitly to forms and pages.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Name of this installation, shown in the terms-of-service link.
    pub platform_name: String,
    /// Address users can write to about their access request.
    pub support_email: String,
    /// Trust `X-Forwarded-*` headers when rebuilding the request URL.
    pub behind_proxy: bool,
    /// Hosts the request URL may carry; anything else is rejected.
    pub allowed_hosts: AllowedHosts,
}

#[derive(Clone)]
pub struct AppState {
    pub access_service: Arc<AccessRequestService>,
    pub auth_service: Arc<AuthService>,
    pub site: Arc<SiteSettings>,
}

impl AppState {
    /// Wires services on top of the given repositories.
    pub fn new(
        access_requests: Arc<dyn AccessRequestRepository>,
        users: Arc<dyn UserRepository>,
        token_signing_secret: String,
        site: SiteSettings,
    ) -> Self {
        Self {
            access_service: Arc::new(AccessRequestService::new(access_requests)),
            auth_service: Arc::new(AuthService::new(users, token_signing_secret)),
            site: Arc::new(site),
        }
    }
}
