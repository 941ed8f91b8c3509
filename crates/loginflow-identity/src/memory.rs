//! In-process identity provider for development and demos.
//!
//! Accounts live in a `HashMap` for the lifetime of the value. Passwords
//! are compared as given. Never use this outside local development.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::Rng;
use rand::distr::Alphanumeric;

use crate::{AuthError, IdentityProvider, ProviderError, Session};

/// Length of generated user ids.
const USER_ID_LEN: usize = 28;

/// Weakest password the provider accepts, in UTF-16 code units.
const MIN_PASSWORD_LEN: usize = 6;

struct Account {
    user_id: String,
    password: String,
}

#[derive(Default)]
struct State {
    accounts: HashMap<String, Account>,
    current: Option<Session>,
}

/// A provider that keeps accounts in memory.
///
/// Mirrors the failure codes of a hosted provider so the login flow can be
/// exercised end to end: malformed email, email in use, weak password,
/// unknown user and wrong password all come back as
/// [`ProviderError::Coded`].
pub struct MemoryProvider {
    state: Mutex<State>,
    /// Simulated round-trip time applied to every call.
    latency: Duration,
    /// When set, `initialize` fails with this error.
    init_failure: Option<ProviderError>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            latency: Duration::ZERO,
            init_failure: None,
        }
    }

    /// Delays every call by `latency` (uses tokio time).
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Makes `initialize` fail with `err`.
    pub fn with_init_failure(mut self, err: ProviderError) -> Self {
        self.init_failure = Some(err);
        self
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> usize {
        self.lock().accounts.len()
    }

    /// The currently signed-in session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.lock().current.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityProvider for MemoryProvider {
    async fn initialize(&self) -> Result<(), ProviderError> {
        self.simulate_latency().await;
        match &self.init_failure {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.simulate_latency().await;

        if !is_well_formed_email(email) {
            return Err(ProviderError::from_auth(AuthError::InvalidEmail));
        }
        if password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ProviderError::from_auth(AuthError::WeakPassword));
        }

        let mut state = self.lock();
        if state.accounts.contains_key(email) {
            return Err(ProviderError::from_auth(AuthError::EmailInUse));
        }

        let user_id = generate_user_id();
        state.accounts.insert(
            email.to_string(),
            Account {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );
        let session = Session::new(user_id, email);
        // Account creation also signs the new user in.
        state.current = Some(session.clone());

        tracing::debug!(%email, user_id = %session.user_id, "memory provider: account created");
        Ok(session)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<Session, ProviderError> {
        self.simulate_latency().await;

        if !is_well_formed_email(email) {
            return Err(ProviderError::from_auth(AuthError::InvalidEmail));
        }

        let mut state = self.lock();
        let account = state
            .accounts
            .get(email)
            .ok_or(ProviderError::from_auth(AuthError::UserNotFound))?;
        if account.password != password {
            return Err(ProviderError::from_auth(AuthError::WrongPassword));
        }

        let session = Session::new(account.user_id.clone(), email);
        state.current = Some(session.clone());
        Ok(session)
    }

    fn sign_out(&self) {
        if let Some(session) = self.lock().current.take() {
            tracing::debug!(email = %session.email, "memory provider: signed out");
        }
    }
}

/// Loose shape check: `local@domain.tld`.
fn is_well_formed_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

fn generate_user_id() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(USER_ID_LEN)
        .map(char::from)
        .collect()
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_check() {
        assert!(is_well_formed_email("a@b.com"));
        assert!(is_well_formed_email("first.last@mail.example.org"));
        assert!(!is_well_formed_email("a@b"));
        assert!(!is_well_formed_email("@b.com"));
        assert!(!is_well_formed_email("a@@b.com"));
        assert!(!is_well_formed_email("a@.com"));
        assert!(!is_well_formed_email("plainaddress"));
    }

    #[test]
    fn test_generated_user_ids_are_alphanumeric_and_unique() {
        let a = generate_user_id();
        let b = generate_user_id();
        assert_eq!(a.len(), USER_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }
}
