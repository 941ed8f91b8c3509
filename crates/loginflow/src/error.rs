//! Unified error type for loginflow.

use std::path::PathBuf;

use loginflow_controller::FlowError;
use loginflow_identity::ProviderError;

/// Top-level error that wraps the per-crate errors.
///
/// The `#[from]` conversions let `?` lift sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum LoginflowError {
    /// A request rejected by the controller (validation, busy, not ready).
    #[error(transparent)]
    Flow(#[from] FlowError),

    /// A failure reported by the identity provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// The config file is not valid JSON for [`AppConfig`](crate::AppConfig).
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
