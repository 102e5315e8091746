mod cli;
mod tui;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app_launcher::app::{AppConfig, AppState, Screen};
use app_launcher::auth::Prompter;
use app_launcher::platform::AppPaths;

use crate::cli::Cli;
use crate::tui::terminal::{self, Tui};
use crate::tui::{App, EventHandler, Theme, TuiPrompter};

/// The terminal belongs to the UI, so logs go to a daily file under the
/// config directory. Dropping the guard flushes it.
fn init_logging(paths: &AppPaths) -> WorkerGuard {
    let appender = tracing_appender::rolling::daily(paths.logs_dir(), "app-launcher.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("app_launcher=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    guard
}

async fn init_app_state(paths: AppPaths) -> anyhow::Result<AppState> {
    let config = AppConfig::load(&paths)
        .await
        .context("Failed to load configuration")?;
    info!("Configuration loaded from {:?}", paths.config_file());

    let state = AppState::new(config, paths).context("Failed to initialize application state")?;
    info!("Application state initialized");
    Ok(state)
}

/// PIN gate, then the main window. Returns the process exit code.
async fn run(terminal: &mut Tui, state: Arc<AppState>) -> anyhow::Result<ExitCode> {
    let ui = &state.config().ui;
    let theme = Theme::from_name(&ui.theme);
    let mut events = EventHandler::new(Duration::from_millis(ui.tick_rate_ms));

    {
        let mut prompter = TuiPrompter::new(terminal, &mut events, theme);
        let verified = state.pin_store().verify_pin(&mut prompter).await?;

        if Screen::Locked.after_verification(verified) == Screen::Terminated {
            warn!("Authentication failed, exiting");
            prompter
                .show_error("Access Denied", "Failed to authenticate. Exiting.")
                .await?;
            return Ok(ExitCode::FAILURE);
        }
    }
    info!("Unlocked");

    let mut app = App::new(state.clone(), events.sender());
    app.initialize().await;

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(event) = events.next().await {
            app.handle_event(event).await;
        }

        if app.should_quit() {
            break;
        }
    }

    info!("Shutting down");
    Ok(ExitCode::SUCCESS)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    Cli::parse();

    let paths = AppPaths::new().context("Failed to resolve the configuration directory")?;
    paths
        .ensure_dirs_exist()
        .context("Failed to create application directories")?;
    let _guard = init_logging(&paths);
    info!("Starting app launcher v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(init_app_state(paths).await?);

    let mut terminal = terminal::init().context("Failed to initialize the terminal")?;
    let result = run(&mut terminal, state).await;

    if let Err(e) = terminal::restore() {
        error!("Failed to restore the terminal: {}", e);
    }
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
