//! The auth flow controller: form handling and screen state for the
//! login and registration screens.
//!
//! # Threading
//!
//! The controller lives on the owner loop and is only ever touched there.
//! Provider calls run on tokio tasks; each task ends by submitting a
//! closure to the [`DispatchHandle`], and the owner runs that closure
//! against the controller on its next drain.
//!
//! ```text
//! login() ──validate──→ tokio::spawn(provider.authenticate)
//!                               │  (any worker thread)
//!                               ▼
//!                     dispatch.submit(|ctrl| ctrl.complete(..))
//!                               │
//!          owner loop: drain() ─┘──→ message overlay, delayed transition
//! ```
//!
//! # Screen state
//!
//! ```text
//!            show_register()
//!   [Login] ───────────────→ [Register]
//!      ↑  ←───────────────────   │
//!      │    show_login() /       │ register() ok + delay
//!      │    back to login        ▼
//!      └─────────────────────────┘
//!   login() ok + delay ──→ navigator.enter_main()
//! ```

use std::sync::Arc;

use loginflow_dispatch::DispatchHandle;
use loginflow_identity::{IdentityProvider, ProviderError, Session};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::messages::MessageCatalog;
use crate::validation::{validate_login, validate_registration};
use crate::{FlowConfig, FlowError, InputFields, Navigator, Operation, ProviderState, Screen};

/// The transient message shown over either screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageOverlay {
    pub text: String,
    /// Success messages render green, failures red.
    pub is_success: bool,
    /// Hidden by the first `tick` at or after this instant.
    pub expires_at: Instant,
}

/// A screen change scheduled after a success message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Transition {
    /// Back to the login form (after registration).
    Login,
    /// Hand off to the main application entry (after login).
    MainEntry,
}

#[derive(Debug, Clone, Copy)]
struct PendingTransition {
    due: Instant,
    target: Transition,
}

/// Drives the login/registration screens against an [`IdentityProvider`].
pub struct AuthFlowController<P: IdentityProvider, N: Navigator> {
    config: FlowConfig,
    messages: &'static MessageCatalog,
    provider: Arc<P>,
    navigator: N,
    dispatch: DispatchHandle<AuthFlowController<P, N>>,

    screen: Screen,
    fields: InputFields,
    overlay: Option<MessageOverlay>,
    pending: Option<PendingTransition>,
    session: Option<Session>,
    in_flight: Option<Operation>,
    /// Bumped on sign-out. Completions from an older epoch are dropped.
    epoch: u64,
    provider_state: ProviderState,
}

impl<P: IdentityProvider, N: Navigator> AuthFlowController<P, N> {
    /// Creates a controller showing the login screen.
    ///
    /// `dispatch` must belong to the dispatcher the owner loop drains.
    pub fn new(
        config: FlowConfig,
        provider: Arc<P>,
        navigator: N,
        dispatch: DispatchHandle<Self>,
    ) -> Self {
        Self {
            messages: MessageCatalog::for_locale(config.locale),
            config,
            provider,
            navigator,
            dispatch,
            screen: Screen::Login,
            fields: InputFields::default(),
            overlay: None,
            pending: None,
            session: None,
            in_flight: None,
            epoch: 0,
            provider_state: ProviderState::Uninitialized,
        }
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Shows the login screen and starts provider initialization.
    ///
    /// Must be called from within a tokio runtime. Calling it again after
    /// a failed initialization retries; otherwise it only resets the
    /// screen.
    pub fn start(&mut self) {
        self.show_login();
        if matches!(
            self.provider_state,
            ProviderState::Initializing | ProviderState::Ready
        ) {
            return;
        }

        self.provider_state = ProviderState::Initializing;
        let provider = Arc::clone(&self.provider);
        let dispatch = self.dispatch.clone();
        tokio::spawn(async move {
            let result = provider.initialize().await;
            dispatch.submit(move |ctrl: &mut Self| ctrl.finish_initialize(result));
        });
    }

    fn finish_initialize(&mut self, result: Result<(), ProviderError>) {
        match result {
            Ok(()) => {
                self.provider_state = ProviderState::Ready;
                info!("identity provider initialized");
            }
            Err(e) => {
                self.provider_state = ProviderState::Failed;
                error!(error = %e, "identity provider initialization failed");
                self.show_message(self.messages.init_failed, false);
            }
        }
    }

    /// Per-tick timer poll: hides an expired overlay and fires a due
    /// screen transition.
    pub fn tick(&mut self, now: Instant) {
        if let Some(p) = self.pending {
            if now >= p.due {
                self.pending = None;
                self.run_transition(p.target);
            }
        }
        if self.overlay.as_ref().is_some_and(|o| now >= o.expires_at) {
            self.overlay = None;
        }
    }

    fn run_transition(&mut self, target: Transition) {
        match target {
            Transition::Login => {
                self.fields.clear();
                self.show_login();
            }
            Transition::MainEntry => {
                let Some(session) = self.session.take() else {
                    warn!("main entry transition without a session, staying on login");
                    return;
                };
                info!(entry = %self.config.main_entry, email = %session.email, "entering main");
                self.navigator.enter_main(&self.config.main_entry, session);
            }
        }
    }

    // -----------------------------------------------------------------
    // Screens
    // -----------------------------------------------------------------

    /// Shows the login form with empty fields and no message.
    pub fn show_login(&mut self) {
        self.switch_screen(Screen::Login);
    }

    /// Shows the registration form with empty fields and no message.
    pub fn show_register(&mut self) {
        self.switch_screen(Screen::Register);
    }

    fn switch_screen(&mut self, screen: Screen) {
        debug!(from = ?self.screen, to = ?screen, "switching screen");
        self.screen = screen;
        self.fields.clear();
        self.overlay = None;
        self.pending = None;
    }

    /// Puts `text` in the overlay for the configured display time.
    pub fn show_message(&mut self, text: impl Into<String>, is_success: bool) {
        let text = text.into();
        debug!(%text, is_success, "showing message");
        self.overlay = Some(MessageOverlay {
            text,
            is_success,
            expires_at: Instant::now() + self.config.message_display_time(),
        });
    }

    // -----------------------------------------------------------------
    // UI triggers
    // -----------------------------------------------------------------

    /// "Sign up" button on the login screen.
    pub fn on_register_button(&mut self) {
        self.show_register();
    }

    /// "Back" button on the registration screen.
    pub fn on_back_to_login(&mut self) {
        self.show_login();
    }

    /// Submit button on the registration screen.
    pub fn on_register_submit(&mut self) -> Result<(), FlowError> {
        let email = self.fields.register_email.clone();
        let password = self.fields.register_password.clone();
        let confirm = self.fields.register_confirm_password.clone();
        self.register(&email, &password, &confirm)
    }

    /// Submit button on the login screen.
    pub fn on_login_submit(&mut self) -> Result<(), FlowError> {
        let email = self.fields.login_email.clone();
        let password = self.fields.login_password.clone();
        self.login(&email, &password)
    }

    // -----------------------------------------------------------------
    // Operations
    // -----------------------------------------------------------------

    /// Validates the form and, if it passes, asks the provider to create
    /// the account. The outcome arrives through the dispatcher.
    ///
    /// # Errors
    /// [`FlowError::Validation`], [`FlowError::NotReady`] or
    /// [`FlowError::Busy`]; no provider call is made in any of them.
    pub fn register(
        &mut self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<(), FlowError> {
        let email = email.trim();
        if let Err(e) = validate_registration(email, password, confirm_password) {
            self.show_message(self.messages.validation(e), false);
            return Err(e.into());
        }
        self.begin(Operation::Register, email, password)
    }

    /// Validates the form and, if it passes, asks the provider to sign in.
    ///
    /// # Errors
    /// Same as [`register`](Self::register).
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), FlowError> {
        let email = email.trim();
        if let Err(e) = validate_login(email, password) {
            self.show_message(self.messages.validation(e), false);
            return Err(e.into());
        }
        self.begin(Operation::Login, email, password)
    }

    /// Signs out if a session is held and resets the screen.
    ///
    /// Returns `false` (and does nothing) when nobody is signed in.
    pub fn sign_out(&mut self) -> bool {
        let Some(session) = self.session.take() else {
            return false;
        };
        self.provider.sign_out();
        self.epoch += 1;
        if let Some(op) = self.in_flight.take() {
            debug!(%op, "signed out with a request in flight, its result will be ignored");
        }
        info!(email = %session.email, "signed out");

        self.show_login();
        self.navigator.reload_current();
        true
    }

    fn begin(&mut self, op: Operation, email: &str, password: &str) -> Result<(), FlowError> {
        if self.provider_state != ProviderState::Ready {
            self.show_message(self.messages.not_ready, false);
            return Err(FlowError::NotReady);
        }
        if let Some(current) = self.in_flight {
            if self.config.guard_double_submit {
                debug!(%op, %current, "request already in flight, ignoring submit");
                return Err(FlowError::Busy(current));
            }
        }

        self.in_flight = Some(op);
        let provider = Arc::clone(&self.provider);
        let email = email.to_string();
        let password = password.to_string();

        let completion = Completion {
            dispatch: Some(self.dispatch.clone()),
            op,
            epoch: self.epoch,
        };

        tokio::spawn(async move {
            let result = match op {
                Operation::Register => provider.create_account(&email, &password).await,
                Operation::Login => provider.authenticate(&email, &password).await,
            };
            completion.deliver(result);
        });
        Ok(())
    }

    /// Applies a provider result. Runs on the owner loop.
    fn complete(&mut self, op: Operation, epoch: u64, result: Result<Session, ProviderError>) {
        if epoch != self.epoch {
            debug!(%op, "ignoring result of a request made before sign-out");
            return;
        }
        self.in_flight = None;

        match result {
            Ok(session) => {
                info!(%op, email = %session.email, user_id = %session.user_id, "{op} succeeded");
                self.session = Some(session);
                self.show_message(self.messages.success(op), true);
                self.pending = Some(PendingTransition {
                    due: Instant::now() + self.config.message_display_time(),
                    target: match op {
                        Operation::Register => Transition::Login,
                        Operation::Login => Transition::MainEntry,
                    },
                });
            }
            Err(e) => {
                warn!(%op, error = %e, "{op} failed");
                let text = self.messages.provider_failure(op, &e);
                self.show_message(text, false);
            }
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn overlay(&self) -> Option<&MessageOverlay> {
        self.overlay.as_ref()
    }

    pub fn fields(&self) -> &InputFields {
        &self.fields
    }

    /// Form inputs, for the UI to bind to.
    pub fn fields_mut(&mut self) -> &mut InputFields {
        &mut self.fields
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The request currently waiting on the provider.
    pub fn in_flight(&self) -> Option<Operation> {
        self.in_flight
    }

    pub fn provider_state(&self) -> ProviderState {
        self.provider_state
    }

    /// `true` while a delayed screen transition is scheduled.
    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_some()
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn config(&self) -> &FlowConfig {
        &self.config
    }
}

/// Carries a provider request's result back to the owner loop.
///
/// Dropped without [`deliver`](Self::deliver) (the provider future
/// panicked, or the task was aborted), it reports the request as
/// cancelled so the controller never stays busy.
struct Completion<P: IdentityProvider, N: Navigator> {
    dispatch: Option<DispatchHandle<AuthFlowController<P, N>>>,
    op: Operation,
    epoch: u64,
}

impl<P: IdentityProvider, N: Navigator> Completion<P, N> {
    fn deliver(mut self, result: Result<Session, ProviderError>) {
        self.send(result);
    }

    fn send(&mut self, result: Result<Session, ProviderError>) {
        let Some(dispatch) = self.dispatch.take() else {
            return;
        };
        let (op, epoch) = (self.op, self.epoch);
        if !dispatch.submit(move |ctrl: &mut AuthFlowController<P, N>| {
            ctrl.complete(op, epoch, result)
        }) {
            debug!(%op, "owner loop gone, dropping provider result");
        }
    }
}

impl<P: IdentityProvider, N: Navigator> Drop for Completion<P, N> {
    fn drop(&mut self) {
        if self.dispatch.is_some() {
            warn!(op = %self.op, "provider task ended without a result");
            self.send(Err(ProviderError::Cancelled));
        }
    }
}
