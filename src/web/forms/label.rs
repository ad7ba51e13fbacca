//! Field labels that know whether they are already markup.

use std::fmt::Display;

use askama::filters;

/// Text of a form field label.
///
/// Plain labels are escaped by the template. Labels built from trusted
/// fragments (such as a link to another page) carry
/// `is_pre_escaped_markup = true` and are emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub is_pre_escaped_markup: bool,
}

impl Label {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_pre_escaped_markup: false,
        }
    }

    /// Wraps markup that is already safe to emit.
    ///
    /// Any untrusted value interpolated into `html` must have gone through
    /// Askama's HTML escaper first.
    pub fn markup(html: impl Into<String>) -> Self {
        Self {
            text: html.into(),
            is_pre_escaped_markup: true,
        }
    }

    /// Builds a label consisting of a single link.
    pub fn link(href: &str, text: &str) -> Self {
        Self::markup(format!(r#"<a href="{}">{}</a>"#, escaped(href), escaped(text)))
    }
}

/// Runs `value` through Askama's HTML escaper, the same one templates use.
fn escaped(value: &str) -> impl Display + '_ {
    let Ok(safe) = filters::escape(value, filters::Html);
    safe
}
