//! Field Validation
//!
//! Payload validators report every violated field at once. Update validators
//! reuse the create validator's rules and add their own on top.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::ValidateEmail;

use crate::ids::TypedId;

/// Violated fields mapped to their messages, keyed by the external field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("one or more validation errors occurred")]
pub struct ValidationErrors {
    fields: BTreeMap<&'static str, Vec<String>>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Errors holding a single message for `field`.
    #[must_use]
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();

        errors.add(field, message);

        errors
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Messages recorded for `field`, if any.
    #[must_use]
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (*field, messages.as_slice()))
    }

    /// `Ok(())` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field was rejected.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// A rule set for values of type `T`.
pub trait Validator<T: ?Sized> {
    /// Record every violation found in `value`.
    fn check(&self, value: &T, errors: &mut ValidationErrors);

    /// Run all rules.
    ///
    /// # Errors
    ///
    /// Returns the collected violations when any rule fails.
    fn validate(&self, value: &T) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        self.check(value, &mut errors);

        errors.into_result()
    }
}

/// Rules for a required, length-limited text field.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RequiredText {
    pub field: &'static str,
    pub max_chars: usize,
    pub required: &'static str,
    pub too_long: &'static str,
}

impl Validator<str> for RequiredText {
    fn check(&self, value: &str, errors: &mut ValidationErrors) {
        if value.trim().is_empty() {
            errors.add(self.field, self.required);
        } else if value.chars().count() > self.max_chars {
            errors.add(self.field, self.too_long);
        }
    }
}

/// Optional description, limited to 500 characters when present.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Description;

pub(crate) const DESCRIPTION_MAX_CHARS: usize = 500;

impl Validator<Option<String>> for Description {
    fn check(&self, value: &Option<String>, errors: &mut ValidationErrors) {
        if value
            .as_deref()
            .is_some_and(|description| description.chars().count() > DESCRIPTION_MAX_CHARS)
        {
            errors.add("description", "Description cannot exceed 500 characters");
        }
    }
}

/// Required, syntactically valid email address.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Email;

impl Validator<str> for Email {
    fn check(&self, value: &str, errors: &mut ValidationErrors) {
        if value.trim().is_empty() {
            errors.add("email", "Email is required");
        } else if !value.validate_email() {
            errors.add("email", "Invalid email format");
        }
    }
}

/// Ids supplied by callers must be positive.
pub(crate) fn positive_id<T>(
    errors: &mut ValidationErrors,
    field: &'static str,
    id: TypedId<T>,
    message: &'static str,
) {
    if !id.is_positive() {
        errors.add(field, message);
    }
}

/// Trim optional text, turning blank text into `None`.
pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
}
