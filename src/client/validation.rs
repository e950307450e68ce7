//! Field checks run by the waitlist form before anything is sent.
//!
//! These are stricter than the server, which only checks that the fields are
//! present.

use std::fmt;

use email_address::{EmailAddress, Options};

use crate::domain::signup::SignupRequest;

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";
pub const ROLE_REQUIRED_MESSAGE: &str = "Please select your role";
pub const SCHOOL_REQUIRED_MESSAGE: &str = "Please enter your school name";

pub const SCHOOL_MIN_CHARS: usize = 2;

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub role: String,
    pub school: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Email,
    Role,
    School,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Role => "role",
            Field::School => "school",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// At most one message per field, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    fn push(&mut self, field: Field, message: &'static str) {
        self.0.push(FieldError { field, message });
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field.as_str(), error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Bare `local@domain.tld` only. Display names, domain literals and quoted
/// local parts are refused.
fn is_plain_email(email: &str) -> bool {
    let options = Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld();

    EmailAddress::parse_with_options(email, options).is_ok_and(|address| {
        address
            .local_part()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '\'' | '+' | '-'))
    })
}

pub fn validate(form: &SignupForm) -> Result<SignupRequest, FieldErrors> {
    let mut errors = FieldErrors::default();

    if !is_plain_email(&form.email) {
        errors.push(Field::Email, INVALID_EMAIL_MESSAGE);
    }

    if form.role.is_empty() {
        errors.push(Field::Role, ROLE_REQUIRED_MESSAGE);
    }

    if form.school.chars().count() < SCHOOL_MIN_CHARS {
        errors.push(Field::School, SCHOOL_REQUIRED_MESSAGE);
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(SignupRequest {
        email: form.email.clone(),
        role: form.role.clone(),
        school: form.school.clone(),
    })
}
