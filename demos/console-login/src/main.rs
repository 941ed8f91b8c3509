use std::time::Duration;

use loginflow::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Navigator
// ---------------------------------------------------------------------------

/// Prints screen changes instead of loading scenes.
#[derive(Default)]
struct ConsoleScreens {
    entered: Option<String>,
}

impl Navigator for ConsoleScreens {
    fn enter_main(&mut self, entry: &str, session: Session) {
        println!("==> entering {entry} as {} ({})", session.email, session.user_id);
        self.entered = Some(entry.to_string());
    }

    fn reload_current(&mut self) {
        println!("==> reloading login screen");
    }
}

type App = LoginApp<MemoryProvider, ConsoleScreens>;

// ---------------------------------------------------------------------------
// Scripted walkthrough
// ---------------------------------------------------------------------------

/// Tokio time to let the loop run after each step.
const STEP: Duration = Duration::from_millis(400);

fn report(app: &App, step: &str) {
    let ctrl = app.controller();
    match ctrl.overlay() {
        Some(o) => {
            let tag = if o.is_success { "ok" } else { "!!" };
            println!("[{:?}] {step}: [{tag}] {}", ctrl.screen(), o.text);
        }
        None => println!("[{:?}] {step}", ctrl.screen()),
    }
}

fn submit(app: &mut App, step: &str, result: Result<(), FlowError>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "{step} rejected locally");
    }
    report(app, step);
}

async fn walkthrough(app: &mut App) {
    let display = app.controller().config().message_display_time();

    app.start();
    app.run_for(STEP).await;
    report(app, "start");

    app.controller_mut().on_register_button();
    let f = app.controller_mut().fields_mut();
    f.register_email = "player@example.com".into();
    f.register_password = "abc".into();
    f.register_confirm_password = "abc".into();
    let r = app.controller_mut().on_register_submit();
    submit(app, "register with short password", r);

    let f = app.controller_mut().fields_mut();
    f.register_password = "hunter22".into();
    f.register_confirm_password = "hunter22".into();
    let r = app.controller_mut().on_register_submit();
    app.run_for(STEP).await;
    submit(app, "register", r);

    app.run_for(display).await;
    report(app, "after success delay");

    let f = app.controller_mut().fields_mut();
    f.login_email = "player@example.com".into();
    f.login_password = "hunter2".into();
    let r = app.controller_mut().on_login_submit();
    app.run_for(STEP).await;
    submit(app, "login with wrong password", r);

    let f = app.controller_mut().fields_mut();
    f.login_password = "hunter22".into();
    let r = app.controller_mut().on_login_submit();
    app.run_for(STEP).await;
    submit(app, "login", r);

    app.run_for(display).await;
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let provider = MemoryProvider::new().with_latency(Duration::from_millis(150));
    let mut app = LoginAppBuilder::new()
        .config(config)
        .build(provider, ConsoleScreens::default());

    walkthrough(&mut app).await;

    if app.controller().navigator().entered.is_none() {
        eprintln!("walkthrough did not reach the main entry");
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_walkthrough_reaches_main_entry() {
        let provider = MemoryProvider::new().with_latency(Duration::from_millis(150));
        let mut app = LoginAppBuilder::new().build(provider, ConsoleScreens::default());

        walkthrough(&mut app).await;

        assert_eq!(app.controller().navigator().entered.as_deref(), Some("MainScene"));
    }
}
