//! User-facing message text.
//!
//! One [`MessageCatalog`] per [`Locale`]. The mapping from
//! [`AuthError`] to text is total; codes outside the known set fall back
//! to a generic line that includes the raw code.

use loginflow_identity::{AuthError, ProviderError};

use crate::{Locale, Operation, ValidationError};

/// Every string the controller can put in the message overlay.
#[derive(Debug)]
pub struct MessageCatalog {
    pub empty_email: &'static str,
    pub empty_password: &'static str,
    pub password_mismatch: &'static str,
    pub password_too_short: &'static str,

    pub register_success: &'static str,
    pub login_success: &'static str,
    pub register_cancelled: &'static str,
    pub login_cancelled: &'static str,

    pub invalid_email: &'static str,
    pub email_in_use: &'static str,
    pub weak_password: &'static str,
    pub wrong_password: &'static str,
    pub user_not_found: &'static str,
    pub too_many_requests: &'static str,
    pub network_failure: &'static str,
    /// Prefix for unrecognized codes; the code is appended.
    pub unknown_code: &'static str,
    /// Failure that carried no code at all.
    pub unknown_failure: &'static str,

    pub init_failed: &'static str,
    pub not_ready: &'static str,
}

pub static KO: MessageCatalog = MessageCatalog {
    empty_email: "이메일을 입력해주세요.",
    empty_password: "비밀번호를 입력해주세요.",
    password_mismatch: "비밀번호가 일치하지 않습니다.",
    password_too_short: "비밀번호는 최소 6자 이상이어야 합니다.",

    register_success: "회원가입이 완료되었습니다!",
    login_success: "로그인 성공!",
    register_cancelled: "회원가입이 취소되었습니다.",
    login_cancelled: "로그인이 취소되었습니다.",

    invalid_email: "이메일 형식이 올바르지 않습니다.",
    email_in_use: "이미 사용 중인 이메일입니다.",
    weak_password: "비밀번호가 너무 약합니다. (최소 6자)",
    wrong_password: "비밀번호가 올바르지 않습니다.",
    user_not_found: "등록되지 않은 이메일입니다.",
    too_many_requests: "너무 많은 요청이 발생했습니다. 잠시 후 다시 시도해주세요.",
    network_failure: "네트워크 연결을 확인해주세요.",
    unknown_code: "오류가 발생했습니다: ",
    unknown_failure: "알 수 없는 오류가 발생했습니다.",

    init_failed: "인증 서비스 초기화에 실패했습니다.",
    not_ready: "인증 서비스를 준비 중입니다. 잠시 후 다시 시도해주세요.",
};

pub static EN: MessageCatalog = MessageCatalog {
    empty_email: "Please enter your email.",
    empty_password: "Please enter your password.",
    password_mismatch: "Passwords do not match.",
    password_too_short: "Password must be at least 6 characters.",

    register_success: "Registration complete!",
    login_success: "Signed in!",
    register_cancelled: "Registration was cancelled.",
    login_cancelled: "Sign-in was cancelled.",

    invalid_email: "The email address is not valid.",
    email_in_use: "This email is already in use.",
    weak_password: "The password is too weak. (at least 6 characters)",
    wrong_password: "The password is incorrect.",
    user_not_found: "No account is registered with this email.",
    too_many_requests: "Too many requests. Please try again later.",
    network_failure: "Please check your network connection.",
    unknown_code: "An error occurred: ",
    unknown_failure: "An unknown error occurred.",

    init_failed: "Failed to initialize the sign-in service.",
    not_ready: "The sign-in service is starting. Please try again shortly.",
};

impl MessageCatalog {
    /// Catalog for `locale`.
    pub fn for_locale(locale: Locale) -> &'static Self {
        match locale {
            Locale::Ko => &KO,
            Locale::En => &EN,
        }
    }

    pub fn validation(&self, err: ValidationError) -> &'static str {
        match err {
            ValidationError::EmptyEmail => self.empty_email,
            ValidationError::EmptyPassword => self.empty_password,
            ValidationError::Mismatch => self.password_mismatch,
            ValidationError::TooShort => self.password_too_short,
        }
    }

    /// Text for a decoded provider error.
    pub fn auth_error(&self, err: AuthError) -> String {
        match err {
            AuthError::InvalidEmail => self.invalid_email.to_string(),
            AuthError::EmailInUse => self.email_in_use.to_string(),
            AuthError::WeakPassword => self.weak_password.to_string(),
            AuthError::WrongPassword => self.wrong_password.to_string(),
            AuthError::UserNotFound => self.user_not_found.to_string(),
            AuthError::TooManyRequests => self.too_many_requests.to_string(),
            AuthError::NetworkFailure => self.network_failure.to_string(),
            AuthError::Unknown(code) => format!("{}{code}", self.unknown_code),
        }
    }

    /// Text for a failed `op`.
    pub fn provider_failure(&self, op: Operation, err: &ProviderError) -> String {
        match err {
            ProviderError::Cancelled => match op {
                Operation::Register => self.register_cancelled.to_string(),
                Operation::Login => self.login_cancelled.to_string(),
            },
            ProviderError::Coded(code) => self.auth_error(AuthError::from_code(*code)),
            ProviderError::Other(_) => self.unknown_failure.to_string(),
        }
    }

    pub fn success(&self, op: Operation) -> &'static str {
        match op {
            Operation::Register => self.register_success,
            Operation::Login => self.login_success,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_korean_auth_error_texts() {
        let c = MessageCatalog::for_locale(Locale::Ko);
        let cases = [
            (AuthError::InvalidEmail, "이메일 형식이 올바르지 않습니다."),
            (AuthError::EmailInUse, "이미 사용 중인 이메일입니다."),
            (AuthError::WeakPassword, "비밀번호가 너무 약합니다. (최소 6자)"),
            (AuthError::WrongPassword, "비밀번호가 올바르지 않습니다."),
            (AuthError::UserNotFound, "등록되지 않은 이메일입니다."),
            (
                AuthError::TooManyRequests,
                "너무 많은 요청이 발생했습니다. 잠시 후 다시 시도해주세요.",
            ),
            (AuthError::NetworkFailure, "네트워크 연결을 확인해주세요."),
        ];
        for (err, text) in cases {
            assert_eq!(c.auth_error(err), text);
        }
    }

    #[test]
    fn test_unknown_code_fallback_includes_raw_code() {
        let ko = MessageCatalog::for_locale(Locale::Ko);
        assert_eq!(ko.auth_error(AuthError::Unknown(5)), "오류가 발생했습니다: 5");

        let en = MessageCatalog::for_locale(Locale::En);
        assert_eq!(en.auth_error(AuthError::Unknown(-1)), "An error occurred: -1");
    }

    #[test]
    fn test_provider_failure_by_operation() {
        let c = MessageCatalog::for_locale(Locale::Ko);
        assert_eq!(
            c.provider_failure(Operation::Register, &ProviderError::Cancelled),
            "회원가입이 취소되었습니다."
        );
        assert_eq!(
            c.provider_failure(Operation::Login, &ProviderError::Cancelled),
            "로그인이 취소되었습니다."
        );
        assert_eq!(
            c.provider_failure(Operation::Login, &ProviderError::Coded(14)),
            "등록되지 않은 이메일입니다."
        );
        assert_eq!(
            c.provider_failure(Operation::Login, &ProviderError::Other("io".into())),
            "알 수 없는 오류가 발생했습니다."
        );
    }

    #[test]
    fn test_every_validation_error_has_text() {
        for locale in [Locale::Ko, Locale::En] {
            let c = MessageCatalog::for_locale(locale);
            for err in [
                ValidationError::EmptyEmail,
                ValidationError::EmptyPassword,
                ValidationError::Mismatch,
                ValidationError::TooShort,
            ] {
                assert!(!c.validation(err).is_empty());
            }
        }
    }
}
