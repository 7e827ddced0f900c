//! Client-side registration form validation.
//!
//! Password confirmation and the terms-of-service agreement are checked
//! before any network call is made; only the canonical fields are ever
//! sent to the server.

use nimbus_core::error::AppError;

/// The registration form as collected from the user.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    /// Desired username.
    pub username: String,
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Password confirmation, never sent to the server.
    pub confirm_password: String,
    /// Whether the user agreed to the terms of service.
    pub agree_to_terms: bool,
}

/// Validate the form locally. Must pass before the register request is
/// issued.
pub fn validate_registration(form: &RegistrationForm) -> Result<(), AppError> {
    if form.password != form.confirm_password {
        return Err(AppError::validation("Passwords do not match"));
    }
    if !form.agree_to_terms {
        return Err(AppError::validation(
            "Please agree to the Terms of Service and Privacy Policy",
        ));
    }
    Ok(())
}
