//! Password policy enforcement for new passwords.

use nimbus_core::config::AuthConfig;
use nimbus_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain at least one special character",
            ));
        }

        // Entropy check on top of the character-class rules
        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig {
            jwt_secret: "s".to_string(),
            jwt_ttl_minutes: 60,
            password_min_length: 8,
        })
    }

    #[test]
    fn test_too_short_rejected() {
        assert!(validator().validate("a1!").is_err());
    }

    #[test]
    fn test_missing_digit_rejected() {
        assert!(validator().validate("no-digits-here!").is_err());
    }

    #[test]
    fn test_missing_special_rejected() {
        assert!(validator().validate("n0specialchars").is_err());
    }

    #[test]
    fn test_weak_but_compliant_rejected() {
        // Meets the character-class rules but zxcvbn scores it low.
        assert!(validator().validate("passw0rd!").is_err());
    }

    #[test]
    fn test_strong_password_accepted() {
        assert!(validator().validate("tr4verse-Mango-Kite!").is_ok());
    }
}
