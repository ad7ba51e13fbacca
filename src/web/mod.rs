//! Browser-facing portal layer.
//!
//! Provides the access request form, the status page, the terms of service
//! and token sign-in. Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`forms`] - Form input, validation and presentation models
//! - [`handlers`] - Template rendering handlers
//! - [`middleware`] - Cookie authentication
//! - [`pages`] - Render-or-redirect decisions for the gated pages
//! - [`route_name`] - Symbolic route names
//! - [`routes`] - Portal route configuration

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod pages;
pub mod route_name;
pub mod routes;
