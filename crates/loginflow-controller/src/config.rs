//! Flow configuration and screen state.

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// FlowConfig
// ---------------------------------------------------------------------------

/// Configuration for the auth flow controller.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// How long a message overlay stays up, in milliseconds. The same
    /// delay is used before the post-success screen transition.
    pub message_display_ms: u64,

    /// Name of the main application entry the navigator is sent to
    /// after a successful login.
    pub main_entry: String,

    /// Language of user-facing messages.
    pub locale: Locale,

    /// Reject a new login/registration while one is still in flight.
    pub guard_double_submit: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            message_display_ms: 2_000,
            main_entry: "MainScene".to_string(),
            locale: Locale::default(),
            guard_double_submit: true,
        }
    }
}

impl FlowConfig {
    /// The overlay/transition delay as a `Duration`.
    pub fn message_display_time(&self) -> Duration {
        Duration::from_millis(self.message_display_ms)
    }
}

/// Message language.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ko,
    En,
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Which form is visible. Exactly one is shown at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Login,
    Register,
}

/// The two provider calls the controller can have in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Register,
    Login,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Register => f.write_str("registration"),
            Self::Login => f.write_str("login"),
        }
    }
}

/// Where the identity provider is in its startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProviderState {
    /// `start()` has not been called.
    #[default]
    Uninitialized,
    /// `initialize()` is running.
    Initializing,
    /// Ready to take login/registration requests.
    Ready,
    /// `initialize()` failed. Calling `start()` again retries.
    Failed,
}

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// Text bound to the five form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputFields {
    pub login_email: String,
    pub login_password: String,
    pub register_email: String,
    pub register_password: String,
    pub register_confirm_password: String,
}

impl InputFields {
    /// Empties every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// `true` if every field is empty.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = FlowConfig::default();
        assert_eq!(cfg.message_display_time(), Duration::from_secs(2));
        assert_eq!(cfg.main_entry, "MainScene");
        assert_eq!(cfg.locale, Locale::Ko);
        assert!(cfg.guard_double_submit);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let cfg: FlowConfig =
            serde_json::from_str(r#"{"message_display_ms": 500, "locale": "en"}"#).unwrap();
        assert_eq!(cfg.message_display_ms, 500);
        assert_eq!(cfg.locale, Locale::En);
        assert_eq!(cfg.main_entry, "MainScene");
    }

    #[test]
    fn test_input_fields_clear() {
        let mut f = InputFields {
            login_email: "a@b.com".into(),
            register_confirm_password: "x".into(),
            ..InputFields::default()
        };
        assert!(!f.is_empty());
        f.clear();
        assert!(f.is_empty());
    }
}
