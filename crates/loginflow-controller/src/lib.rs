//! Login and registration flow for loginflow.
//!
//! The controller validates form input, hands credentials to an
//! [`IdentityProvider`](loginflow_identity::IdentityProvider), and updates
//! screen state only from the owner loop, via the dispatcher.
//!
//! # Key types
//!
//! - [`AuthFlowController`]: the screen state machine and its operations
//! - [`FlowConfig`]: display delay, main entry name, locale
//! - [`Navigator`]: what the controller calls to leave or reload the screen
//! - [`ValidationError`] / [`FlowError`]: local, pre-network rejections
//! - [`MessageCatalog`]: localized overlay text

mod config;
mod controller;
mod error;
mod messages;
mod navigator;
mod validation;

pub use config::{FlowConfig, InputFields, Locale, Operation, ProviderState, Screen};
pub use controller::{AuthFlowController, MessageOverlay};
pub use error::FlowError;
pub use messages::MessageCatalog;
pub use navigator::Navigator;
pub use validation::{MIN_PASSWORD_LEN, ValidationError, validate_login, validate_registration};
