//! Main-thread dispatch for loginflow.
//!
//! Identity-provider callbacks complete on whatever thread the provider
//! chose. UI state must only be touched by the one loop that owns it. This
//! crate is the hand-off point between the two:
//!
//! - [`Dispatcher`]: the owner's FIFO queue, drained once per tick
//! - [`DispatchHandle`]: cloneable, `Send` submit side for other threads
//! - [`TickScheduler`]: the fixed-rate clock that paces the owner loop

mod dispatcher;
mod tick;

pub use dispatcher::{DispatchHandle, Dispatcher, DrainReport, PendingCallback};
pub use tick::{TickConfig, TickInfo, TickScheduler};
