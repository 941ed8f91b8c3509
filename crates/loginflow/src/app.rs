//! `LoginApp` builder and owner loop.
//!
//! Ties the layers together: one [`Dispatcher`], the controller it drains
//! into, and the tick scheduler that paces both.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use loginflow_controller::{AuthFlowController, FlowConfig, Navigator};
use loginflow_dispatch::{DispatchHandle, Dispatcher, DrainReport, TickConfig, TickScheduler};
use loginflow_identity::IdentityProvider;
use tokio::time::Instant;

use crate::AppConfig;

/// The controller type a [`LoginApp`] drives.
pub type Controller<P, N> = AuthFlowController<P, N>;

/// Builder for a [`LoginApp`].
///
/// # Example
///
/// ```rust,ignore
/// use loginflow::prelude::*;
///
/// let mut app = LoginAppBuilder::new()
///     .tick_rate(30)
///     .build(MemoryProvider::new(), MyNavigator);
/// app.start();
/// app.run_until(tokio::signal::ctrl_c()).await;
/// ```
pub struct LoginAppBuilder {
    flow: FlowConfig,
    tick: TickConfig,
}

impl LoginAppBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            flow: FlowConfig::default(),
            tick: TickConfig::default(),
        }
    }

    /// Applies a loaded config file.
    pub fn config(mut self, config: AppConfig) -> Self {
        self.tick = config.tick_config();
        self.flow = config.flow;
        self
    }

    /// Sets the controller configuration.
    pub fn flow_config(mut self, flow: FlowConfig) -> Self {
        self.flow = flow;
        self
    }

    /// Sets the owner loop rate.
    pub fn tick_rate(mut self, tick_rate_hz: u32) -> Self {
        self.tick.tick_rate_hz = tick_rate_hz;
        self
    }

    /// Builds the app. Nothing runs until [`LoginApp::start`].
    pub fn build<P, N>(self, provider: P, navigator: N) -> LoginApp<P, N>
    where
        P: IdentityProvider,
        N: Navigator,
    {
        self.build_shared(Arc::new(provider), navigator)
    }

    /// Like [`build`](Self::build), for a provider the caller also keeps.
    pub fn build_shared<P, N>(self, provider: Arc<P>, navigator: N) -> LoginApp<P, N>
    where
        P: IdentityProvider,
        N: Navigator,
    {
        let dispatcher = Dispatcher::new();
        let controller =
            AuthFlowController::new(self.flow, provider, navigator, dispatcher.handle());
        LoginApp {
            dispatcher,
            controller,
            scheduler: TickScheduler::new(self.tick),
        }
    }
}

impl Default for LoginAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A login screen with its owner loop.
///
/// Not `Send`: the app, and with it the controller, stays on the thread
/// that built it. Run it with `block_on`/`#[tokio::main]`, not
/// `tokio::spawn`.
pub struct LoginApp<P: IdentityProvider, N: Navigator> {
    dispatcher: Dispatcher<Controller<P, N>>,
    controller: Controller<P, N>,
    scheduler: TickScheduler,
}

impl<P: IdentityProvider, N: Navigator> LoginApp<P, N> {
    /// Shows the login screen and starts provider initialization.
    pub fn start(&mut self) {
        self.controller.start();
    }

    /// One tick of work: run queued callbacks, then the controller's
    /// timers.
    pub fn pump(&mut self) -> DrainReport {
        let report = self.dispatcher.drain(&mut self.controller);
        self.controller.tick(Instant::now());
        report
    }

    /// Runs the owner loop until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        tracing::info!(rate_hz = self.scheduler.tick_rate_hz(), "login loop running");

        loop {
            tokio::select! {
                () = &mut shutdown => break,
                _ = self.scheduler.wait_for_tick() => {
                    self.pump();
                    self.scheduler.record_tick_end();
                }
            }
        }

        tracing::info!(ticks = self.scheduler.tick_count(), "login loop stopped");
    }

    /// Runs the owner loop for `duration` of (tokio) time.
    pub async fn run_for(&mut self, duration: Duration) {
        self.run_until(tokio::time::sleep(duration)).await;
    }

    /// Submit-only handle for code on other threads.
    pub fn handle(&self) -> DispatchHandle<Controller<P, N>> {
        self.dispatcher.handle()
    }

    pub fn controller(&self) -> &Controller<P, N> {
        &self.controller
    }

    /// Direct access for UI events raised on the owner thread.
    pub fn controller_mut(&mut self) -> &mut Controller<P, N> {
        &mut self.controller
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }
}
