//! The screen-level collaborator outside the login flow.

use loginflow_identity::Session;

/// Leaves or resets the login screen.
///
/// Called only from the owner loop, so implementations may own UI state
/// directly and need not be `Send`.
pub trait Navigator: 'static {
    /// Switch to the main application entry named `entry`. The session is
    /// handed over; the login flow no longer holds it.
    fn enter_main(&mut self, entry: &str, session: Session);

    /// Reload the current screen from scratch (after sign-out).
    fn reload_current(&mut self);
}
