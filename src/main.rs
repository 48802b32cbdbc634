mod app;
mod config;
mod error;
mod estimate;
mod form;
mod gemini;
mod handler;
mod tui;
mod ui;

use std::fs;
use std::sync::Mutex;

use anyhow::Result;

use app::App;
use config::Config;
use gemini::GeminiClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().unwrap_or_default();
    init_logging()?;

    // Credential resolution happens here, before any terminal setup: a
    // missing key is a startup failure, not a per-request one.
    let api_key = config.resolve_api_key()?;
    let client = GeminiClient::new(&api_key, config.model());

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(client);

    let result = run(&mut terminal, &mut events, &mut app).await;

    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui, events: &mut tui::EventHandler, app: &mut App) -> Result<()> {
    tracing::info!(model = app.model_name(), "starting estimator session");

    loop {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event).await?,
            None => break,
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Diagnostics go to a file: the terminal belongs to the TUI.
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let log_file = fs::File::options().create(true).append(true).open(log_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
