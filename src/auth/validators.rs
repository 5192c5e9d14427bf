//! Request validators for the auth endpoints

use super::models::{LoginRequest, SignupRequest, FIELD_BLANK, FIELD_REQUIRED};
use crate::common::{ValidationResult, Validator};

/// Signup needs a non-empty username, password and email.
/// Whitespace-only values count as present; formats are not checked.
pub struct SignupValidator;

impl Validator<SignupRequest> for SignupValidator {
    fn validate(&self, data: &SignupRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (field, value) in [
            ("username", &data.username),
            ("password", &data.password),
            ("email", &data.email),
        ] {
            if value.as_deref().map_or(true, str::is_empty) {
                result.add_error(field, FIELD_REQUIRED);
            }
        }

        result
    }
}

/// Login reports missing and blank fields separately.
/// Expects a request that has already been trimmed.
pub struct LoginValidator;

impl Validator<LoginRequest> for LoginValidator {
    fn validate(&self, data: &LoginRequest) -> ValidationResult {
        let mut result = ValidationResult::new();

        for (field, value) in [("username", &data.username), ("password", &data.password)] {
            match value.as_deref() {
                None => result.add_error(field, FIELD_REQUIRED),
                Some("") => result.add_error(field, FIELD_BLANK),
                Some(_) => {}
            }
        }

        result
    }
}
