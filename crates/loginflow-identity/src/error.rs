//! Error types for identity-provider calls.
//!
//! Two layers:
//!
//! - [`ProviderError`] is what a provider call fails with. It carries the
//!   provider's raw numeric code when there is one.
//! - [`AuthError`] is the decoded, closed set of failures the login flow
//!   knows how to explain to a user. Unknown codes are kept verbatim in
//!   [`AuthError::Unknown`].

/// Raw provider error codes the login flow recognizes.
///
/// Values follow the identity SDK's auth error enum.
pub mod codes {
    pub const EMAIL_ALREADY_IN_USE: i32 = 8;
    pub const INVALID_EMAIL: i32 = 11;
    pub const WRONG_PASSWORD: i32 = 12;
    pub const TOO_MANY_REQUESTS: i32 = 13;
    pub const USER_NOT_FOUND: i32 = 14;
    pub const NETWORK_REQUEST_FAILED: i32 = 19;
    pub const WEAK_PASSWORD: i32 = 23;
}

/// Failure reported by an [`IdentityProvider`](crate::IdentityProvider) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider cancelled the request on its own accord
    /// (for example during shutdown).
    #[error("request cancelled by the identity provider")]
    Cancelled,

    /// The provider rejected the request with a coded error.
    #[error("identity provider error code {0}")]
    Coded(i32),

    /// The provider failed without an error code.
    #[error("identity provider failure: {0}")]
    Other(String),
}

impl ProviderError {
    /// Shorthand for a coded error from a decoded [`AuthError`].
    pub fn from_auth(err: AuthError) -> Self {
        Self::Coded(err.code())
    }

    /// Decodes the provider code, if this error has one.
    pub fn auth_error(&self) -> Option<AuthError> {
        match self {
            Self::Coded(code) => Some(AuthError::from_code(*code)),
            Self::Cancelled | Self::Other(_) => None,
        }
    }
}

/// Decoded provider authentication failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum AuthError {
    #[error("malformed email address")]
    InvalidEmail,
    #[error("email address already in use")]
    EmailInUse,
    #[error("password too weak")]
    WeakPassword,
    #[error("wrong password")]
    WrongPassword,
    #[error("no account for this email")]
    UserNotFound,
    #[error("too many requests")]
    TooManyRequests,
    #[error("network request failed")]
    NetworkFailure,
    /// Any code outside the recognized set, kept for diagnostics.
    #[error("unrecognized provider error code {0}")]
    Unknown(i32),
}

impl AuthError {
    /// Decodes a raw provider code. Total: unrecognized codes become
    /// [`AuthError::Unknown`].
    pub fn from_code(code: i32) -> Self {
        match code {
            codes::INVALID_EMAIL => Self::InvalidEmail,
            codes::EMAIL_ALREADY_IN_USE => Self::EmailInUse,
            codes::WEAK_PASSWORD => Self::WeakPassword,
            codes::WRONG_PASSWORD => Self::WrongPassword,
            codes::USER_NOT_FOUND => Self::UserNotFound,
            codes::TOO_MANY_REQUESTS => Self::TooManyRequests,
            codes::NETWORK_REQUEST_FAILED => Self::NetworkFailure,
            other => Self::Unknown(other),
        }
    }

    /// The raw provider code for this error.
    pub fn code(&self) -> i32 {
        match self {
            Self::InvalidEmail => codes::INVALID_EMAIL,
            Self::EmailInUse => codes::EMAIL_ALREADY_IN_USE,
            Self::WeakPassword => codes::WEAK_PASSWORD,
            Self::WrongPassword => codes::WRONG_PASSWORD,
            Self::UserNotFound => codes::USER_NOT_FOUND,
            Self::TooManyRequests => codes::TOO_MANY_REQUESTS,
            Self::NetworkFailure => codes::NETWORK_REQUEST_FAILED,
            Self::Unknown(code) => *code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_recognizes_every_known_code() {
        let known = [
            (11, AuthError::InvalidEmail),
            (8, AuthError::EmailInUse),
            (23, AuthError::WeakPassword),
            (12, AuthError::WrongPassword),
            (14, AuthError::UserNotFound),
            (13, AuthError::TooManyRequests),
            (19, AuthError::NetworkFailure),
        ];
        for (code, expected) in known {
            assert_eq!(AuthError::from_code(code), expected);
            assert_eq!(expected.code(), code);
        }
    }

    #[test]
    fn test_unknown_code_is_preserved() {
        assert_eq!(AuthError::from_code(5), AuthError::Unknown(5));
        assert_eq!(AuthError::Unknown(-1).code(), -1);
    }

    #[test]
    fn test_provider_error_decodes_only_coded_variant() {
        assert_eq!(
            ProviderError::Coded(12).auth_error(),
            Some(AuthError::WrongPassword)
        );
        assert_eq!(ProviderError::Cancelled.auth_error(), None);
        assert_eq!(ProviderError::Other("socket".into()).auth_error(), None);
    }

    #[test]
    fn test_from_auth_round_trips_code() {
        let err = ProviderError::from_auth(AuthError::UserNotFound);
        assert_eq!(err, ProviderError::Coded(14));
        assert!(err.to_string().contains("14"));
    }
}
