//! The API access request form.
//!
//! [`AccessRequestInput`] is what the browser posts, [`validate`] turns it into
//! [`AccessRequestFields`] or [`FieldErrors`], and [`AccessRequestForm`] is the
//! presentation model handed to the template, bound to submitted values and
//! errors when re-rendering.

use serde::{Deserialize, Deserializer};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::entities::AccessRequestFields;
use crate::web::forms::label::Label;
use crate::web::route_name::Route;

/// Appended to every label. Empty, so labels render without a trailing colon.
pub const LABEL_SUFFIX: &str = "";

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Raw form submission.
///
/// Missing fields deserialize as empty; an unchecked checkbox is simply
/// absent from the body and becomes `false`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AccessRequestInput {
    #[serde(default)]
    #[validate(custom(function = "required"))]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub company_name: String,

    #[serde(default)]
    #[validate(custom(function = "website_url"))]
    #[validate(length(max = 255, message = "Ensure this value has at most 255 characters."))]
    pub website: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    #[validate(length(max = 2000, message = "Ensure this value has at most 2000 characters."))]
    pub company_address: String,

    #[serde(default)]
    #[validate(custom(function = "required"))]
    #[validate(length(max = 2000, message = "Ensure this value has at most 2000 characters."))]
    pub reason: String,

    #[serde(default, deserialize_with = "checkbox")]
    #[validate(custom(function = "accepted"))]
    pub terms_of_service: bool,
}

impl AccessRequestInput {
    /// Copy with surrounding whitespace stripped from the text fields.
    fn trimmed(&self) -> Self {
        Self {
            company_name: self.company_name.trim().to_string(),
            website: self.website.trim().to_string(),
            company_address: self.company_address.trim().to_string(),
            reason: self.reason.trim().to_string(),
            terms_of_service: self.terms_of_service,
        }
    }
}

fn checkbox<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(
        raw.to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    ))
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn required(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

fn website_url(value: &str) -> Result<(), ValidationError> {
    required(value)?;

    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") && parsed.has_host() => Ok(()),
        _ => Err(error("url", "Enter a valid URL.")),
    }
}

fn accepted(value: &bool) -> Result<(), ValidationError> {
    if !*value {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Validation messages keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Messages for one field; empty if the field is valid.
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the fields that failed validation, in alphabetical order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut map = BTreeMap::new();

        for (field, field_errors) in errors.field_errors() {
            let messages = field_errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect::<Vec<_>>();
            map.insert(field.to_string(), messages);
        }

        FieldErrors(map)
    }
}

/// Validates a submission.
///
/// Text fields are trimmed here and nowhere else; `input` itself is left as
/// submitted so a re-rendered form shows what the user typed. The cleaned
/// values are returned only when every field passes and the terms of service
/// were accepted.
///
/// # Errors
///
/// Returns [`FieldErrors`] describing every invalid field.
pub fn validate(input: &AccessRequestInput) -> Result<AccessRequestFields, FieldErrors> {
    let input = input.trimmed();
    Validate::validate(&input).map_err(FieldErrors::from)?;

    Ok(AccessRequestFields {
        company_name: input.company_name,
        website: input.website,
        company_address: input.company_address,
        reason: input.reason,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    Text,
    Url,
    Textarea,
    Checkbox,
}

/// One rendered field of the form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: Label,
    pub help_text: Option<&'static str>,
    pub widget: Widget,
    pub required: bool,
    /// Submitted value, or `"on"` for a checked checkbox.
    pub value: String,
    pub errors: Vec<String>,
}

impl FormField {
    fn new(
        name: &'static str,
        label: Label,
        help_text: Option<&'static str>,
        widget: Widget,
    ) -> Self {
        Self {
            name,
            label,
            help_text,
            widget,
            required: true,
            value: String::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_textarea(&self) -> bool {
        self.widget == Widget::Textarea
    }

    pub fn is_checkbox(&self) -> bool {
        self.widget == Widget::Checkbox
    }

    pub fn is_checked(&self) -> bool {
        self.is_checkbox() && !self.value.is_empty()
    }

    /// `type` attribute for `<input>` widgets.
    pub fn input_type(&self) -> &'static str {
        match self.widget {
            Widget::Text | Widget::Textarea => "text",
            Widget::Url => "url",
            Widget::Checkbox => "checkbox",
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Presentation model of the access request form.
#[derive(Debug, Clone)]
pub struct AccessRequestForm {
    pub fields: Vec<FormField>,
    pub label_suffix: &'static str,
}

impl AccessRequestForm {
    /// Builds an empty form.
    ///
    /// `platform_name` is interpolated into the terms-of-service link label.
    pub fn new(platform_name: &str) -> Self {
        let terms_label = Label::link(
            Route::TermsOfService.path(),
            &format!("{platform_name} API Terms of Service"),
        );

        Self {
            fields: vec![
                FormField::new(
                    "company_name",
                    Label::plain("Company Name"),
                    Some("The name of your company."),
                    Widget::Text,
                ),
                FormField::new(
                    "website",
                    Label::plain("Website"),
                    Some("The URL of your company's website."),
                    Widget::Url,
                ),
                FormField::new(
                    "company_address",
                    Label::plain("Company Address"),
                    Some("The contact address of your company."),
                    Widget::Textarea,
                ),
                FormField::new(
                    "reason",
                    Label::plain("Describe what your application does."),
                    None,
                    Widget::Textarea,
                ),
                FormField::new("terms_of_service", terms_label, None, Widget::Checkbox),
            ],
            label_suffix: LABEL_SUFFIX,
        }
    }

    /// Builds a form re-populated with a rejected submission.
    pub fn bound(platform_name: &str, input: &AccessRequestInput, errors: &FieldErrors) -> Self {
        let mut form = Self::new(platform_name);

        for field in &mut form.fields {
            field.value = match field.name {
                "company_name" => input.company_name.clone(),
                "website" => input.website.clone(),
                "company_address" => input.company_address.clone(),
                "reason" => input.reason.clone(),
                "terms_of_service" if input.terms_of_service => "on".to_string(),
                _ => String::new(),
            };
            field.errors = errors.get(field.name).to_vec();
        }

        form
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_errors(&self) -> bool {
        self.fields.iter().any(FormField::has_errors)
    }
}
