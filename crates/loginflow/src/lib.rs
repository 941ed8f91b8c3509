//! # loginflow
//!
//! A login/registration screen over an external identity provider.
//!
//! The provider's async completions may land on any thread. loginflow
//! routes them through a main-thread dispatcher, so screen state is only
//! ever changed by the loop that owns it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use loginflow::prelude::*;
//!
//! struct Screens;
//!
//! impl Navigator for Screens {
//!     fn enter_main(&mut self, entry: &str, session: Session) {
//!         println!("{} → {entry}", session.email);
//!     }
//!     fn reload_current(&mut self) {}
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut app = LoginAppBuilder::new().build(MemoryProvider::new(), Screens);
//!     app.start();
//!     app.run_for(std::time::Duration::from_secs(1)).await;
//! }
//! ```

mod app;
mod config;
mod error;

pub use app::{Controller, LoginApp, LoginAppBuilder};
pub use config::AppConfig;
pub use error::LoginflowError;

pub use loginflow_controller as controller;
pub use loginflow_dispatch as dispatch;
pub use loginflow_identity as identity;

pub mod prelude {
    pub use crate::{AppConfig, LoginApp, LoginAppBuilder, LoginflowError};
    pub use loginflow_controller::{
        AuthFlowController, FlowConfig, FlowError, Locale, Navigator, Operation, ProviderState,
        Screen, ValidationError,
    };
    pub use loginflow_dispatch::{DispatchHandle, Dispatcher, TickConfig};
    pub use loginflow_identity::{AuthError, IdentityProvider, MemoryProvider, ProviderError, Session};
}
