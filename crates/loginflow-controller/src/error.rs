//! Error types for the controller layer.

use crate::{Operation, ValidationError};

/// Why a login/registration request was not sent to the provider.
///
/// Provider-side failures are not in here: they arrive later, through the
/// dispatcher, and are shown as messages.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// The form failed a local check.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A request is already outstanding and double-submission is guarded.
    #[error("a {0} request is already in flight")]
    Busy(Operation),

    /// The identity provider has not finished (or failed) initializing.
    #[error("identity provider is not ready")]
    NotReady,
}
