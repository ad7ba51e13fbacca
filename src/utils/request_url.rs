//! Reconstruction of the absolute URL of an incoming request.
//!
//! Axum only sees the path and query of a request; scheme and host come from
//! headers. When the service runs behind a trusted reverse proxy the
//! `X-Forwarded-Proto` / `X-Forwarded-Host` headers take precedence.
//!
//! The resulting host is checked against [`AllowedHosts`] so that a forged
//! `Host` header cannot end up in URLs the portal builds.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, Uri, header, request::Parts},
};
use serde_json::json;
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// Host names the portal answers to, configured through `ALLOWED_HOSTS`.
///
/// # Patterns
///
/// - `example.com` matches that host exactly
/// - `.example.com` matches `example.com` and any subdomain of it
/// - `*` matches any host
///
/// Patterns never carry a port; matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedHosts(Vec<String>);

impl AllowedHosts {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            patterns
                .into_iter()
                .map(|p| p.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        )
    }

    /// Parses a comma-separated list such as `portal.example.com,.example.org`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn patterns(&self) -> &[String] {
        &self.0
    }

    /// Whether `host` (without port) matches one of the patterns.
    pub fn allows(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();

        self.0.iter().any(|pattern| {
            if pattern == "*" {
                return true;
            }
            match pattern.strip_prefix('.') {
                Some(domain) => {
                    host == domain
                        || host
                            .strip_suffix(domain)
                            .is_some_and(|sub| sub.ends_with('.'))
                }
                None => host == *pattern,
            }
        })
    }
}

/// Builds the absolute URL of a request from its headers and URI.
///
/// # Resolution Order
///
/// - **Scheme**: `X-Forwarded-Proto` (proxy mode only), then the URI scheme, then `http`
/// - **Host**: `X-Forwarded-Host` (proxy mode only), then `Host`, then the URI authority
///
/// Forwarded headers may carry a comma-separated chain; the first entry is the
/// client-facing one.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if no host can be determined, the
/// resulting URL does not parse, or its host is not in `allowed_hosts`.
pub fn absolute_url(
    headers: &HeaderMap,
    uri: &Uri,
    behind_proxy: bool,
    allowed_hosts: &AllowedHosts,
) -> Result<Url, AppError> {
    let forwarded = |name: &str| -> Option<String> {
        if !behind_proxy {
            return None;
        }
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let scheme = forwarded(X_FORWARDED_PROTO)
        .or_else(|| uri.scheme_str().map(str::to_string))
        .unwrap_or_else(|| "http".to_string());

    let host = forwarded(X_FORWARDED_HOST)
        .or_else(|| {
            headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .or_else(|| uri.authority().map(|a| a.to_string()))
        .ok_or_else(|| AppError::bad_request("Missing Host header", json!({})))?;

    let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

    let url = Url::parse(&format!("{scheme}://{host}{path_and_query}")).map_err(|e| {
        AppError::bad_request(
            "Cannot determine request URL",
            json!({ "reason": e.to_string() }),
        )
    })?;

    match url.host_str() {
        Some(name) if allowed_hosts.allows(name) => Ok(url),
        _ => {
            tracing::warn!(host = %host, "Rejected request for a host outside ALLOWED_HOSTS");
            Err(AppError::bad_request(
                "Invalid Host header",
                json!({ "host": host }),
            ))
        }
    }
}

/// Reduces a URL to its scheme and authority.
///
/// Path, query, fragment and credentials are discarded; the host is
/// lowercased and default ports are dropped by the URL parser.
///
/// # Examples
///
/// ```ignore
/// let url = Url::parse("https://example.com/apply?ref=1").unwrap();
/// assert_eq!(base_url_of(&url), "https://example.com");
/// ```
pub fn base_url_of(url: &Url) -> String {
    let mut base = format!("{}://", url.scheme());

    if let Some(host) = url.host_str() {
        base.push_str(host);
    }

    if let Some(port) = url.port() {
        base.push(':');
        base.push_str(&port.to_string());
    }

    base
}

/// Extractor yielding the absolute URL of the current request.
#[derive(Debug, Clone)]
pub struct RequestUrl(pub Url);

impl RequestUrl {
    /// Scheme and authority of the request.
    pub fn base_url(&self) -> String {
        base_url_of(&self.0)
    }
}

impl FromRequestParts<AppState> for RequestUrl {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        absolute_url(
            &parts.headers,
            &parts.uri,
            state.site.behind_proxy,
            &state.site.allowed_hosts,
        )
        .map(RequestUrl)
    }
}
