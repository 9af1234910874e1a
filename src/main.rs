use std::io;
use std::sync::Arc;
use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use soundsnap::api::{AccountApi, AccountClient, CatalogApi, CatalogClient};
use soundsnap::config::{AppConfig, Cli};
use soundsnap::controller::AppController;
use soundsnap::logging;
use soundsnap::model::{AppModel, SessionHandle, SessionStore};
use soundsnap::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_cli(Cli::parse());

    let _log_guard = match logging::init_logging(&config.log_dir) {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: Failed to initialize logging: {}", e);
            None
        }
    };

    tracing::info!(
        account_url = %config.account.base_url,
        catalog_url = %config.catalog.base_url,
        session_file = %config.session_file.display(),
        "=== Soundsnap Starting ==="
    );

    let catalog: Arc<dyn CatalogApi> =
        Arc::new(CatalogClient::new(config.catalog.clone()).context("Invalid catalog configuration")?);
    let account: Arc<dyn AccountApi> =
        Arc::new(AccountClient::new(config.account.clone()).context("Invalid account service configuration")?);
    let session = SessionHandle::spawn(SessionStore::new(config.session_file.clone()));

    let model = Arc::new(AppModel::new());
    let controller = AppController::new(model.clone(), catalog, account, session);

    // Restore the saved session and load the feed in background
    let controller_for_restore = controller.clone();
    tokio::spawn(async move {
        controller_for_restore.restore_session().await;
    });
    controller.load_feed().await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller.clone()).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller.shutdown().await;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Soundsnap shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Auto-clear old informational alerts
        model.auto_clear_old_alerts().await;

        // Get current state
        let ui_state = model.get_ui_state().await;
        let feed = model.get_feed().await;
        let account = model.get_account().await;

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &feed, &account);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Err(e) = controller.handle_key_event(key).await {
                    tracing::warn!(error = %e, "Key handling failed");
                }
            }
        }

        if model.should_quit().await {
            break;
        }
    }

    Ok(())
}
