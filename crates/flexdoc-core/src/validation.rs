//! Client-side input validation
//!
//! Malformed credentials are rejected here, before any network call.
//! Field-level rules (email shape, name length) live as `validator`
//! attributes on the request types; password strength needs character-class
//! checks the derive cannot express, so it is a custom function.

use validator::{Validate, ValidationError};

use crate::error::ClientError;
use crate::models::{LoginRequest, SignupRequest};

pub const PASSWORD_MIN_LENGTH: usize = 8;

/// At least 8 characters with one uppercase letter, one lowercase letter,
/// and one digit.
pub fn password_strength(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= PASSWORD_MIN_LENGTH;
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_upper && has_lower && has_digit {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength").with_message(
            "Password must be at least 8 characters with an uppercase letter, \
             a lowercase letter, and a number"
                .into(),
        ))
    }
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), ClientError> {
    request.validate().map_err(ClientError::from)
}

pub fn validate_login(request: &LoginRequest) -> Result<(), ClientError> {
    request.validate().map_err(ClientError::from)
}
