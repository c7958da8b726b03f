//! Inventario TUI - terminal frontend for the inventory API
//!
//! Run: cargo run -p inventario-tui

mod app;
mod bridge;
mod ui;

use std::io;
use std::sync::Arc;

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use inventario_client::config::ClientConfig;
use inventario_client::controller::InventoryController;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::bridge::UiBridge;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Route tracing into the TUI log pane
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();
    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    tracing::info!("API de inventario en {}", config.base_url);
    let gateway = Arc::new(config.build_gateway()?);

    let (ui_tx, ui_rx) = mpsc::unbounded_channel();
    let bridge = Arc::new(UiBridge::new(ui_tx));
    let controller = Arc::new(InventoryController::new(
        gateway,
        bridge.clone(),
        bridge.clone(),
        bridge,
    ));

    // Initial load happens while the first frames render
    {
        let controller = controller.clone();
        tokio::spawn(async move { controller.load().await });
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let state_rx = controller.subscribe();
    let mut app = App::new(controller, state_rx, ui_rx);
    let result = app.run(&mut terminal).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
