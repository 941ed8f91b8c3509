//! Local form checks, run before any provider call.

/// Shortest password the registration form accepts.
///
/// Measured in UTF-16 code units, the unit the identity SDK counts in,
/// so a character outside the BMP (most emoji) counts twice.
pub const MIN_PASSWORD_LEN: usize = 6;

/// A form rejected before reaching the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("email is empty")]
    EmptyEmail,
    #[error("password is empty")]
    EmptyPassword,
    #[error("password and confirmation do not match")]
    Mismatch,
    #[error("password is shorter than {MIN_PASSWORD_LEN} characters")]
    TooShort,
}

/// Checks a login form. Surrounding whitespace in `email` is ignored.
pub fn validate_login(email: &str, password: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}

/// Checks a registration form. Rules apply in order; the first failure
/// wins.
pub fn validate_registration(
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    validate_login(email, password)?;
    if password != confirm_password {
        return Err(ValidationError::Mismatch);
    }
    if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort);
    }
    Ok(())
}
