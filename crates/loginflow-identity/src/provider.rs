//! The identity-provider contract.
//!
//! loginflow does not implement authentication. Account storage, password
//! checks and token issuance all belong to the provider (Firebase, Auth0,
//! Supabase, a custom backend...). The login flow only needs the four
//! calls below.

use std::future::Future;

use crate::{ProviderError, Session};

/// Async identity-provider client.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static`: the controller shares the provider with the
///   tokio tasks that run each call, and those tasks may land on any
///   worker thread.
/// - Returned futures are `Send` for the same reason.
///
/// Completions are never delivered to UI state directly; the controller
/// routes them back through its dispatcher.
pub trait IdentityProvider: Send + Sync + 'static {
    /// One-time client setup, run when the login screen starts.
    ///
    /// Default: ready immediately.
    fn initialize(&self) -> impl Future<Output = Result<(), ProviderError>> + Send {
        async { Ok(()) }
    }

    /// Creates an account and returns the resulting session.
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, ProviderError>> + Send;

    /// Signs in with existing credentials.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Session, ProviderError>> + Send;

    /// Invalidates the provider's local signed-in state.
    fn sign_out(&self);
}
