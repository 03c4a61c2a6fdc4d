//! Terminal UI for Connect Four

mod app;
mod board;
mod ui;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep};
use tracing::{error, info, instrument};

use crate::config::ClientConfig;
use crate::dispatcher::MoveDispatcher;
use crate::gateway::{GameGateway, HttpGateway};
use crate::store::GameStore;

use app::{App, AppEvent};
pub use board::format_board;

/// Run the TUI client
pub async fn run_tui(config: ClientConfig) -> Result<()> {
    // Log to a file so tracing output does not corrupt the screen
    let log_file = std::fs::File::create(config.log_file())?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init();

    info!(server_url = %config.server_url(), "Starting Connect Four TUI");

    let gateway = HttpGateway::new(config.server_url(), config.request_timeout())?;
    let store = GameStore::new();
    let dispatcher = MoveDispatcher::new(gateway, store);
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let app = App::new(dispatcher, config.difficulties().clone(), event_tx);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, event_rx).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "TUI loop error");
    }
    info!("TUI exited");
    res
}

/// Draw, apply completions and store changes, then read one key.
#[instrument(skip_all)]
async fn run_app<B, G>(
    terminal: &mut Terminal<B>,
    mut app: App<G>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()>
where
    B: ratatui::backend::Backend,
    <B as ratatui::backend::Backend>::Error: Send + Sync + 'static,
    G: GameGateway + 'static,
{
    loop {
        while let Ok(event) = event_rx.try_recv() {
            app.handle_event(event);
        }
        app.sync_with_store();

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            app.handle_key(key.code);
        }

        if app.should_quit() {
            info!("User quit");
            return Ok(());
        }

        sleep(Duration::from_millis(10)).await;
    }
}
