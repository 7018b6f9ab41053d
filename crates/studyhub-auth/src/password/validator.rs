//! Password policy enforcement for new passwords.

use studyhub_core::error::AppError;

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 4;

/// Validates new passwords before they are hashed.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a validator with a custom minimum length.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns `Ok(())` if the password meets the policy.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        Ok(())
    }
}

impl Default for PasswordValidator {
    fn default() -> Self {
        Self::new(MIN_PASSWORD_LENGTH)
    }
}
