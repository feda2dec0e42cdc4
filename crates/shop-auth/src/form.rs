//! Client-side checks for the registration form.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the user typed into the registration form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    /// Password confirmation.
    pub password2: String,
    pub first_name: String,
    pub last_name: String,
}

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a form, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<FieldError>);

impl FormErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Message for `field`, if it was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

/// Body of the registration request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub password2: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: Option<&'a str>,
    pub date_of_birth: Option<&'a str>,
    pub profile_picture: Option<&'a str>,
}

impl RegisterForm {
    /// Check required fields, the email shape and the password confirmation.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if self.first_name.trim().is_empty() {
            errors.push("first_name", "First name is required");
        }
        if self.last_name.trim().is_empty() {
            errors.push("last_name", "Last name is required");
        }
        if self.email.trim().is_empty() {
            errors.push("email", "Email is required");
        } else if !is_valid_email(self.email.trim()) {
            errors.push("email", "Please enter a valid email address");
        }
        if self.password.is_empty() {
            errors.push("password", "Password is required");
        }
        if self.password2.is_empty() {
            errors.push("password2", "Please confirm your password");
        } else if self.password != self.password2 {
            errors.push("password2", "Passwords do not match");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// The request body the backend expects. Optional profile fields are
    /// sent as explicit nulls.
    pub fn to_request(&self) -> RegisterRequest<'_> {
        RegisterRequest {
            email: self.email.trim(),
            password: &self.password,
            password2: &self.password2,
            first_name: self.first_name.trim(),
            last_name: self.last_name.trim(),
            phone_number: None,
            date_of_birth: None,
            profile_picture: None,
        }
    }
}

/// Check `email` against `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    // Needs a dot with at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
