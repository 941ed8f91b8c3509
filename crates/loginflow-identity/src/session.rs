//! The authenticated-identity handle returned by a provider.

use serde::{Deserialize, Serialize};

/// An authenticated identity.
///
/// Opaque to the login flow apart from the two attributes it displays or
/// forwards. Token lifecycle stays inside the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Provider-assigned user identifier.
    pub user_id: String,
    /// Email address the user signed in with.
    pub email: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}
