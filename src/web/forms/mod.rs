//! HTML form models.

pub mod access_request_form;
pub mod label;

pub use access_request_form::{
    AccessRequestForm, AccessRequestInput, FieldErrors, FormField, LABEL_SUFFIX, Widget, validate,
};
pub use label::Label;
