//! Identity-provider boundary for loginflow.
//!
//! Everything the login flow knows about the outside identity service:
//!
//! 1. **The contract**: [`IdentityProvider`], four async-or-sync calls
//! 2. **The result**: [`Session`], an opaque signed-in handle
//! 3. **The failures**: [`ProviderError`] and its decoded form [`AuthError`]
//!
//! [`MemoryProvider`] implements the contract in-process for demos and
//! local development.
//!
//! # How it fits in the stack
//!
//! ```text
//! Controller (above)  ← calls the provider, maps its errors to messages
//!     ↕
//! Identity (this crate)  ← provider contract and its data types
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod memory;
mod provider;
mod session;

pub use error::{AuthError, ProviderError, codes};
pub use memory::MemoryProvider;
pub use provider::IdentityProvider;
pub use session::Session;
